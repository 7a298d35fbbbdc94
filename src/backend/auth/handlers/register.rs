/**
 * Registration Handler
 *
 * This module implements user registration for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate username, email format, password length, and requested role
 * 2. Check that neither the email nor the username is taken
 * 3. Hash the password with bcrypt (blocking pool, configured cost)
 * 4. Create the user
 * 5. Issue a JWT and return it with the public profile
 *
 * # Validation
 *
 * - Email must contain '@'
 * - Password must be at least 8 characters
 * - Username must be 3-30 chars, start with a letter, and contain only
 *   letters, digits, and underscores
 * - Role may be "user" or "advisor"; admin accounts are provisioned at
 *   startup, never self-registered
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest, UserResponse};
use crate::backend::auth::password::hash_password;
use crate::backend::auth::policy::Role;
use crate::backend::auth::users::{create_user, get_user_by_email, get_user_by_username, NewUser};
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Resolve the requested role
///
/// Absent or empty means "user". Admin is rejected outright: there is no
/// self-service path to that tier.
fn parse_requested_role(role: Option<&str>) -> Result<Role, ApiError> {
    match role {
        None | Some("") => Ok(Role::default()),
        Some(value) => match Role::parse(value) {
            Some(Role::Admin) => Err(ApiError::validation(
                "role must be \"user\" or \"advisor\"",
            )),
            Some(role) => Ok(role),
            None => Err(ApiError::validation("role must be \"user\" or \"advisor\"")),
        },
    }
}

/// Registration handler
///
/// # Errors
///
/// * `400 Bad Request` - invalid username, email, password, or role
/// * `409 Conflict` - email or username already registered
/// * `500 Internal Server Error` - hashing, storage, or signing failure
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    tracing::info!("registration request for username: {}", request.username);

    if !is_valid_username(&request.username) {
        return Err(ApiError::validation(
            "username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }

    if !request.email.contains('@') {
        return Err(ApiError::validation("invalid email format"));
    }

    if request.password.len() < 8 {
        return Err(ApiError::validation(
            "password must be at least 8 characters",
        ));
    }

    let role = parse_requested_role(request.role.as_deref())?;

    if get_user_by_email(&state.db, &request.email).await?.is_some() {
        return Err(ApiError::conflict("email already registered"));
    }

    if get_user_by_username(&state.db, &request.username).await?.is_some() {
        return Err(ApiError::conflict("username already taken"));
    }

    let password_hash = hash_password(&request.password, state.config.bcrypt_cost)
        .await
        .map_err(|e| {
            tracing::error!("failed to hash password: {}", e);
            ApiError::Internal
        })?;

    let user = create_user(
        &state.db,
        NewUser {
            full_name: request.full_name,
            email: request.email,
            username: request.username,
            password_hash,
            city: request.city,
            region: request.region,
            expertise: request.expertise,
            work_region: request.work_region,
            role,
        },
    )
    .await
    .map_err(|e| {
        // Two identical registrations can race past the pre-checks; the
        // unique index is the authority
        if e.as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false)
        {
            ApiError::conflict("email or username already registered")
        } else {
            ApiError::Database(e)
        }
    })?;

    let token = state.sessions.issue(user.id, user.role).map_err(|e| {
        tracing::error!("failed to issue token: {}", e);
        ApiError::Internal
    })?;

    tracing::info!("user created: {} ({})", user.username, user.role);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("bob_99"));
        assert!(is_valid_username("Xyz"));
    }

    #[test]
    fn test_invalid_usernames() {
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("9lives"));
        assert!(!is_valid_username("_underscore"));
        assert!(!is_valid_username("has space"));
        assert!(!is_valid_username(&"a".repeat(31)));
    }

    #[test]
    fn test_role_defaults_to_user() {
        assert_eq!(parse_requested_role(None).unwrap(), Role::User);
        assert_eq!(parse_requested_role(Some("")).unwrap(), Role::User);
    }

    #[test]
    fn test_advisor_role_accepted() {
        assert_eq!(parse_requested_role(Some("advisor")).unwrap(), Role::Advisor);
    }

    #[test]
    fn test_admin_role_rejected() {
        assert!(parse_requested_role(Some("admin")).is_err());
        assert!(parse_requested_role(Some("landlord")).is_err());
    }
}
