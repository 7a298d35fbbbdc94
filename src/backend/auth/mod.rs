//! Authentication Module
//!
//! This module handles user credentials, JWT sessions, and role policy.
//! It provides the HTTP handlers for registration, login, and profile
//! access, and the building blocks the authentication gate is made of.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and the AuthError type
//! ├── users.rs        - User model and database operations
//! ├── password.rs     - bcrypt hashing and verification
//! ├── sessions.rs     - JWT issuance and verification
//! ├── policy.rs       - Roles and the authorization predicate
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - User registration handler
//!     ├── login.rs    - User authentication handler
//!     ├── profile.rs  - Current-user profile handler
//!     └── admin.rs    - Admin user listing handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: JSON body validated, password hashed, user created,
//!    token returned
//! 2. **Login**: credentials verified against the stored digest, token
//!    returned
//! 3. **Gated request**: token verified by the middleware, identity
//!    attached, role policy consulted by the handler
//!
//! # Security
//!
//! - Passwords are stored as bcrypt digests only; the plaintext never
//!   leaves the handler and is never logged
//! - Tokens are HS256-signed with a secret injected from configuration
//! - Tokens expire after a configurable TTL (one hour by default)
//! - Failed logins return one uniform 401 regardless of the cause

use axum::http::StatusCode;
use thiserror::Error;

/// User data model and database operations
pub mod users;

/// Password hashing and verification
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// Roles and authorization policy
pub mod policy;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
pub use handlers::{get_profile, list_users, login, register};
pub use policy::{authorize, Action, Role};
pub use sessions::{Claims, SessionKeys};

/// Authentication failure kinds
///
/// Every way a token can fail verification, in the order the checks run:
/// absence, undecodable input, signature mismatch, expiry. `Forbidden` is
/// the one authorization (not authentication) kind and maps to 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No token was provided in the configured header
    #[error("no token provided")]
    MissingToken,
    /// The token could not be decoded at all
    #[error("malformed token")]
    MalformedToken,
    /// The token decoded but its signature does not match
    #[error("invalid token signature")]
    InvalidSignature,
    /// The token is past its expiry
    #[error("token expired")]
    Expired,
    /// The identity is valid but the role is insufficient
    #[error("insufficient privileges")]
    Forbidden,
}

impl AuthError {
    /// HTTP status for this failure: 403 for authorization, 401 otherwise
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}
