/**
 * Profile Handler
 *
 * This module implements GET /api/user/profile: the authenticated user's
 * own record, minus anything sensitive. The identity comes from the
 * authentication gate; this handler only resolves it to a fresh row.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

/// Current-user profile handler
///
/// # Errors
///
/// * `401 Unauthorized` - handled by the gate before this runs
/// * `404 Not Found` - the account was deleted after the token was issued
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = get_user_by_id(&state.db, identity.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    Ok(Json(UserResponse::from(user)))
}
