//! Backend Error Module
//!
//! This module defines the error types returned by HTTP handlers and the
//! conversion that turns them into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Taxonomy
//!
//! - `Validation` - malformed input, missing required field (400)
//! - `Auth` - missing/bad/expired token (401) or insufficient role (403)
//! - `InvalidCredentials` - failed login (401)
//! - `Forbidden` - valid identity, insufficient role or ownership (403)
//! - `NotFound` - no record for the given id (404)
//! - `Conflict` - duplicate unique field or invalid state transition (409)
//! - `Database` / `Internal` - storage or server faults (500, generic body)
//!
//! Handlers return `Result<_, ApiError>` and let the `IntoResponse`
//! conversion render a consistent JSON error body. Internal detail never
//! reaches the client; it is logged server-side instead.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;
