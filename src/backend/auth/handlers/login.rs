/**
 * Login Handler
 *
 * This module implements user authentication for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up the user by email
 * 2. Verify the password against the stored bcrypt digest
 * 3. Issue a JWT carrying the user's id and role
 *
 * # Security Notes
 *
 * - Unknown email and wrong password return the same 401, so responses
 *   reveal nothing about which accounts exist
 * - Password verification runs on the blocking pool
 * - Neither the password nor the issued token is ever logged
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::backend::auth::password::verify_password;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email or wrong password
/// * `500 Internal Server Error` - storage or signing failure
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    tracing::info!("login request for: {}", request.email);

    let user = get_user_by_email(&state.db, &request.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&request.password, &user.password_hash).await {
        tracing::warn!("failed login for: {}", request.email);
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.sessions.issue(user.id, user.role).map_err(|e| {
        tracing::error!("failed to issue token: {}", e);
        ApiError::Internal
    })?;

    tracing::info!("user logged in: {}", user.username);

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(user),
    }))
}
