//! Server Module
//!
//! This module contains the code for configuring and initializing the
//! Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState shared across handlers
//! ├── config.rs       - Environment configuration and database pool
//! └── init.rs         - App assembly and admin bootstrap
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration loading**: every knob is read from the environment
//!    once at startup; a missing signing secret aborts the boot
//! 2. **Database**: the SQLite pool is opened and embedded migrations run
//! 3. **State creation**: the session keys are built from the secret and
//!    shared, immutably, with every handler
//! 4. **Router creation**: public and gated routes are assembled

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::AppConfig;
pub use init::create_app;
pub use state::AppState;
