//! Property Listings Module
//!
//! Advisors publish listings of properties they can offer; any
//! authenticated user can browse them. Listings have no lifecycle beyond
//! creation, so this module stays small.
//!
//! # Module Structure
//!
//! ```text
//! properties/
//! ├── mod.rs      - Module exports and documentation
//! ├── db.rs       - Model and queries
//! └── handlers.rs - HTTP handlers and wire types
//! ```

/// Property model and database operations
pub mod db;

/// HTTP handlers for property endpoints
pub mod handlers;

pub use db::Property;
