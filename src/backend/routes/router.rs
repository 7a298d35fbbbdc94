/**
 * Router Configuration
 *
 * This module provides the main router creation function combining the
 * public and protected route sets into a single Axum router.
 *
 * # Route Order
 *
 * 1. Public routes (register, login)
 * 2. Protected routes, wrapped in the authentication middleware
 * 3. Fallback handler (404)
 *
 * The gate is applied as a layer on the protected set only, so every
 * private endpoint passes through it exactly once and the public ones
 * never do.
 */

use axum::{http::StatusCode, middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::backend::middleware::auth::auth_middleware;
use crate::backend::routes::api_routes::{protected_routes, public_routes};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `state` - Application state shared with handlers and the gate
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(state: AppState) -> Router<()> {
    let gated = protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes())
        .merge(gated)
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(TraceLayer::new_for_http())
        // The web clients are served from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
