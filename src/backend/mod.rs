//! Backend Module
//!
//! This module contains all server-side code for the Allnik advisory
//! backend. It provides an Axum HTTP server with JWT authentication,
//! role-gated advisory request handling, and SQLite persistence.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Credentials, JWT sessions, role policy, auth handlers
//! - **`middleware`** - The authentication gate protecting private routes
//! - **`requests`** - Advisory request entity and its lifecycle handlers
//! - **`properties`** - Property listings published by advisors
//! - **`error`** - API error taxonomy and HTTP response conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Configuration, state, initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Password hashing, sessions, roles, handlers
//! ├── middleware/     - Authentication gate
//! ├── requests/       - Advisory request CRUD and transitions
//! ├── properties/     - Advisor listings
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! Public endpoints (`/api/auth/register`, `/api/auth/login`) validate a
//! JSON body, talk to the credential store, and issue a signed token.
//! Every other endpoint is wrapped by `middleware::auth_middleware`, which
//! extracts the token from the configured header, verifies it, and attaches
//! the resolved `{user_id, role}` identity to the request before any
//! handler runs. Handlers then consult `auth::policy` for role and
//! ownership decisions.
//!
//! # Concurrency
//!
//! Requests are handled independently. The only cross-request state is the
//! immutable configuration (behind `Arc`) and the sqlx pool, so no locking
//! is needed anywhere in this module. Password hashing is deliberately
//! expensive and runs on the blocking thread pool.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication, sessions, and role policy
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Advisory request entity and handlers
pub mod requests;

/// Property listings published by advisors
pub mod properties;

/// Backend error types
pub mod error;

// Re-export commonly used types
pub use error::ApiError;
pub use server::state::AppState;
