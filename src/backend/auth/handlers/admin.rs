/**
 * Admin User Listing Handler
 *
 * This module implements GET /api/admin/users. Admin only; every other
 * role gets a 403 from the role policy.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::policy::{authorize, Action};
use crate::backend::auth::users;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

/// List every registered user
///
/// # Errors
///
/// * `403 Forbidden` - caller is not an admin
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    if !authorize(identity.role, Action::ListUsers) {
        return Err(ApiError::forbidden("admin role required"));
    }

    let users = users::list_users(&state.db).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
