//! Authentication Handlers Module
//!
//! This module contains the HTTP handlers for account endpoints.
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register - User registration
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`get_profile`** - GET /api/user/profile - Current user's profile
//! - **`list_users`** - GET /api/admin/users - Admin user listing
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage and never logged
//! - Registration never accepts the admin role from the request body
//! - Failed logins return one uniform 401 regardless of the cause

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Current-user profile handler
pub mod profile;

/// Admin user listing handler
pub mod admin;

// Re-export commonly used types
pub use types::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

// Re-export handlers
pub use admin::list_users;
pub use login::login;
pub use profile::get_profile;
pub use register::register;
