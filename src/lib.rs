//! Allnik - Main Library
//!
//! Allnik is a real-estate advisory backend. Clients register, describe the
//! property they are looking for, and advisors pick those requests up, work
//! them, and publish listings of their own. Every protected endpoint sits
//! behind a single JWT authentication gate with role-based authorization.
//!
//! # Module Structure
//!
//! The library exposes one top-level module:
//!
//! - **`backend`** - The Axum HTTP server
//!   - Authentication (bcrypt credentials, JWT sessions, role policy)
//!   - Advisory request lifecycle (create, accept, complete, cancel)
//!   - Property listings published by advisors
//!   - SQLite persistence via sqlx
//!
//! # Usage
//!
//! ```rust,no_run
//! use allnik::backend::server::config::AppConfig;
//! use allnik::backend::server::init::create_app;
//!
//! # async fn example() {
//! let config = AppConfig::from_env().expect("invalid configuration");
//! let app = create_app(config).await.expect("failed to initialize");
//! // Serve `app` with axum
//! # }
//! ```

/// Backend server-side code
pub mod backend;
