//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server.
//! Currently that is the authentication gate every protected route
//! passes through exactly once.

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
