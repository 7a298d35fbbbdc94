/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by the account
 * handlers. Wire names are camelCase to match the existing web clients.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;

/// Registration request
///
/// Profile fields beyond the credentials are optional; advisors usually
/// fill in `expertise` and `workRegion`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name
    pub full_name: String,
    /// Email address (unique, used to log in)
    pub email: String,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// Password (hashed before storage)
    pub password: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub expertise: Option<String>,
    #[serde(default)]
    pub work_region: Option<String>,
    /// Requested role: "user" (default) or "advisor"
    #[serde(default)]
    pub role: Option<String>,
}

/// Login request
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email the account was registered with
    pub email: String,
    /// Password (verified against the stored digest)
    pub password: String,
}

/// Auth response
///
/// Returned by register and login. Contains the signed token and the
/// user's public profile for immediate use by the client.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Signed JWT (expires after the configured TTL)
    pub token: String,
    /// User information (without sensitive data)
    pub user: UserResponse,
}

/// User response (without sensitive data)
///
/// The public shape of a user record. The password digest never appears
/// here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User's unique ID (UUID)
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub city: Option<String>,
    pub region: Option<String>,
    pub expertise: Option<String>,
    pub work_region: Option<String>,
    /// Access tier: "user", "advisor", or "admin"
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            full_name: user.full_name,
            email: user.email,
            username: user.username,
            city: user.city,
            region: user.region,
            expertise: user.expertise,
            work_region: user.work_region,
            role: user.role.to_string(),
        }
    }
}
