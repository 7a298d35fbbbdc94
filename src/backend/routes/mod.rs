//! Routes Module
//!
//! This module assembles the HTTP surface of the backend: the public
//! account endpoints and the gated API behind the authentication
//! middleware.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports and documentation
//! ├── router.rs     - Top-level router assembly and layers
//! └── api_routes.rs - Endpoint-to-handler wiring
//! ```

/// Top-level router assembly
pub mod router;

/// API endpoint wiring
pub mod api_routes;

pub use router::create_router;
