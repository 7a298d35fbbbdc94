//! Common test utilities and helpers
//!
//! Shared fixtures for the API integration tests: an in-memory database,
//! a test configuration with a fast bcrypt cost, seeded users, and a
//! logged-in token helper.

// Each test binary compiles this module separately and uses a different
// subset of it
#![allow(dead_code)]

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use allnik::backend::auth::policy::Role;
use allnik::backend::auth::users::{create_user, NewUser, User};
use allnik::backend::routes::router::create_router;
use allnik::backend::server::config::AppConfig;
use allnik::backend::server::state::AppState;

/// Password every seeded user gets
pub const TEST_PASSWORD: &str = "password123";

/// Configuration used by the test servers
///
/// The minimum bcrypt cost keeps the suite fast; the rest matches the
/// production defaults.
pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        port: 0,
        jwt_secret: "integration-test-secret-long-enough!".to_string(),
        token_ttl: Duration::from_secs(3600),
        bcrypt_cost: 4,
        token_header: "authorization".to_string(),
        owner_cancel: true,
        admin_bootstrap: None,
    }
}

/// Create a migrated in-memory database
///
/// A single connection so every handle sees the same in-memory store.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");
    pool
}

/// Spin up a test server over the given config and a fresh database
pub async fn spawn_server(config: AppConfig) -> (TestServer, SqlitePool) {
    let pool = test_pool().await;
    let state = AppState::new(pool.clone(), config);
    let server = TestServer::new(create_router(state)).expect("failed to start test server");
    (server, pool)
}

/// Insert a user directly, bypassing the HTTP surface
///
/// Lets tests seed advisors and admins without going through the
/// registration rules.
pub async fn seed_user(pool: &SqlitePool, email: &str, username: &str, role: Role) -> User {
    let password_hash = bcrypt::hash(TEST_PASSWORD, 4).expect("failed to hash test password");
    create_user(
        pool,
        NewUser {
            full_name: format!("Test {username}"),
            email: email.to_string(),
            username: username.to_string(),
            password_hash,
            city: None,
            region: None,
            expertise: None,
            work_region: None,
            role,
        },
    )
    .await
    .expect("failed to seed user")
}

/// Log a seeded user in and return their token
pub async fn login(server: &TestServer, email: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .await;
    assert_eq!(response.status_code().as_u16(), 200, "login failed for {email}");

    let body: serde_json::Value = response.json();
    body["token"].as_str().expect("no token in login response").to_string()
}

/// Build the `authorization: Bearer <token>` header pair
pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&format!("Bearer {token}")).expect("invalid header value"),
    )
}
