/**
 * API Route Handlers
 *
 * This module wires endpoints to handlers, split into the public routes
 * (registration and login) and everything that sits behind the
 * authentication gate.
 *
 * # Routes
 *
 * ## Public
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 *
 * ## Protected (gated)
 * - `GET  /api/user/profile` - Current user's profile
 * - `POST /api/requests` / `GET /api/requests` - Create / list own
 * - `GET  /api/requests/{id}` - View one request
 * - `POST /api/requests/{id}/accept|complete|cancel` - Transitions
 * - `GET  /api/advisor/requests` - Advisor working set
 * - `POST /api/properties` / `GET /api/properties` - Listings
 * - `GET  /api/admin/requests` / `GET /api/admin/users` - Admin views
 */

use axum::routing::{get, post};
use axum::Router;

use crate::backend::auth::handlers::{get_profile, list_users, login, register};
use crate::backend::properties::handlers::{create_property, list_properties};
use crate::backend::requests::handlers::{
    accept_request, cancel_request, complete_request, create_request, get_request,
    list_all_requests, list_my_requests, list_open_requests,
};
use crate::backend::server::state::AppState;

/// Routes reachable without a token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

/// Routes behind the authentication gate
///
/// The gate itself is layered on in `router.rs`; handlers here can assume
/// a verified identity is attached to the request.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/api/user/profile", get(get_profile))
        .route("/api/requests", post(create_request).get(list_my_requests))
        .route("/api/requests/{id}", get(get_request))
        .route("/api/requests/{id}/accept", post(accept_request))
        .route("/api/requests/{id}/complete", post(complete_request))
        .route("/api/requests/{id}/cancel", post(cancel_request))
        .route("/api/advisor/requests", get(list_open_requests))
        .route("/api/properties", post(create_property).get(list_properties))
        .route("/api/admin/requests", get(list_all_requests))
        .route("/api/admin/users", get(list_users))
}
