//! Advisory Requests Module
//!
//! This module owns the request entity connecting clients to advisors:
//! a client describes the property they are after, an advisor accepts the
//! request, works it, and completes it. The client (or an admin) can
//! cancel along the way.
//!
//! # Module Structure
//!
//! ```text
//! requests/
//! ├── mod.rs      - Module exports and documentation
//! ├── db.rs       - Model and guarded status-transition queries
//! └── handlers.rs - HTTP handlers and wire types
//! ```
//!
//! # Status Lifecycle
//!
//! ```text
//! pending ──accept──> accepted ──complete──> completed
//!    │                   │
//!    └──────cancel───────┴──cancel──> cancelled
//! ```
//!
//! Transitions are enforced twice: handlers check the fetched row and
//! reject invalid moves with 409, and the UPDATE itself is guarded on the
//! expected current status so concurrent transitions cannot double-fire.

/// Request model and database operations
pub mod db;

/// HTTP handlers for request endpoints
pub mod handlers;

pub use db::{AdvisoryRequest, RequestStatus};
