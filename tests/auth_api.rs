//! Authentication API integration tests
//!
//! End-to-end tests for registration, login, the profile endpoint, and
//! the authentication gate, driven through the real router.

mod common;

use common::{bearer, login, seed_user, spawn_server, test_config, TEST_PASSWORD};

use allnik::backend::auth::policy::Role;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;

fn register_body(email: &str, username: &str) -> serde_json::Value {
    serde_json::json!({
        "fullName": "Arta Hoxha",
        "email": email,
        "username": username,
        "password": TEST_PASSWORD,
        "city": "Tirana",
    })
}

#[tokio::test]
async fn test_register_success() {
    let (server, _pool) = spawn_server(test_config()).await;

    let response = server
        .post("/api/auth/register")
        .json(&register_body("arta@example.com", "arta"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "arta@example.com");
    assert_eq!(body["user"]["role"], "user");
    // The digest never appears in a response
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_advisor_role() {
    let (server, _pool) = spawn_server(test_config()).await;

    let mut body = register_body("adv@example.com", "advisor1");
    body["role"] = "advisor".into();
    body["expertise"] = "residential".into();

    let response = server.post("/api/auth/register").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["user"]["role"], "advisor");
    assert_eq!(body["user"]["expertise"], "residential");
}

#[tokio::test]
async fn test_register_rejects_admin_role() {
    let (server, _pool) = spawn_server(test_config()).await;

    let mut body = register_body("boss@example.com", "boss");
    body["role"] = "admin".into();

    let response = server.post("/api/auth/register").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_validation() {
    let (server, _pool) = spawn_server(test_config()).await;

    let bad_email = register_body("not-an-email", "gooduser");
    let response = server.post("/api/auth/register").json(&bad_email).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let mut short_password = register_body("ok@example.com", "gooduser");
    short_password["password"] = "short".into();
    let response = server.post("/api/auth/register").json(&short_password).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let bad_username = register_body("ok@example.com", "9starts_with_digit");
    let response = server.post("/api/auth/register").json(&bad_username).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let (server, _pool) = spawn_server(test_config()).await;

    let response = server
        .post("/api/auth/register")
        .json(&register_body("dup@example.com", "original"))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = server
        .post("/api/auth/register")
        .json(&register_body("dup@example.com", "impostor"))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    // The first account is untouched and can still log in
    let token = login(&server, "dup@example.com").await;
    let (name, value) = bearer(&token);
    let response = server.get("/api/user/profile").add_header(name, value).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["username"], "original");
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let (server, _pool) = spawn_server(test_config()).await;

    server
        .post("/api/auth/register")
        .json(&register_body("first@example.com", "sameuser"))
        .await;
    let response = server
        .post("/api/auth/register")
        .json(&register_body("second@example.com", "sameuser"))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_success_and_failure_are_distinct() {
    let (server, pool) = spawn_server(test_config()).await;
    seed_user(&pool, "user@example.com", "someone", Role::User).await;

    let ok = server
        .post("/api/auth/login")
        .json(&serde_json::json!({"email": "user@example.com", "password": TEST_PASSWORD}))
        .await;
    assert_eq!(ok.status_code(), StatusCode::OK);
    let body: serde_json::Value = ok.json();
    assert!(body["token"].as_str().is_some());

    // Wrong password and unknown account look identical to a caller
    let wrong_password = server
        .post("/api/auth/login")
        .json(&serde_json::json!({"email": "user@example.com", "password": "wrong-password"}))
        .await;
    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);

    let unknown = server
        .post("/api/auth/login")
        .json(&serde_json::json!({"email": "ghost@example.com", "password": TEST_PASSWORD}))
        .await;
    assert_eq!(unknown.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_round_trip() {
    let (server, pool) = spawn_server(test_config()).await;
    seed_user(&pool, "me@example.com", "myself", Role::User).await;
    let token = login(&server, "me@example.com").await;

    let (name, value) = bearer(&token);
    let response = server.get("/api/user/profile").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["email"], "me@example.com");
    assert_eq!(body["username"], "myself");
}

#[tokio::test]
async fn test_gate_rejects_missing_and_garbage_tokens() {
    let (server, _pool) = spawn_server(test_config()).await;

    let response = server.get("/api/user/profile").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let (name, value) = bearer("invalid.token.here");
    let response = server.get("/api/user/profile").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gate_accepts_raw_token_without_bearer() {
    let (server, pool) = spawn_server(test_config()).await;
    seed_user(&pool, "raw@example.com", "rawuser", Role::User).await;
    let token = login(&server, "raw@example.com").await;

    let response = server
        .get("/api/user/profile")
        .add_header(
            axum::http::HeaderName::from_static("authorization"),
            axum::http::HeaderValue::from_str(&token).unwrap(),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_gate_uses_configured_header() {
    let mut config = test_config();
    config.token_header = "x-auth-token".to_string();
    let (server, pool) = spawn_server(config).await;
    seed_user(&pool, "hdr@example.com", "hdruser", Role::User).await;
    let token = login(&server, "hdr@example.com").await;

    // The configured header works
    let response = server
        .get("/api/user/profile")
        .add_header(
            axum::http::HeaderName::from_static("x-auth-token"),
            axum::http::HeaderValue::from_str(&token).unwrap(),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // The default header is ignored under this deployment convention
    let (name, value) = bearer(&token);
    let response = server.get("/api/user/profile").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_zero_ttl_token_is_expired_on_arrival() {
    let mut config = test_config();
    config.token_ttl = std::time::Duration::from_secs(0);
    let (server, pool) = spawn_server(config).await;
    seed_user(&pool, "ttl@example.com", "ttluser", Role::User).await;
    let token = login(&server, "ttl@example.com").await;

    let (name, value) = bearer(&token);
    let response = server.get("/api/user/profile").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_fresh_user_denied_admin_endpoints() {
    let (server, _pool) = spawn_server(test_config()).await;

    // Full journey: register, log in with the same credentials, then hit
    // an admin-only endpoint with the freshly minted "user" claim
    let response = server
        .post("/api/auth/register")
        .json(&register_body("plain@example.com", "plain"))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let token = login(&server, "plain@example.com").await;

    let (name, value) = bearer(&token);
    let response = server.get("/api/admin/users").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_lists_users() {
    let (server, pool) = spawn_server(test_config()).await;
    seed_user(&pool, "plain@example.com", "plain", Role::User).await;
    seed_user(&pool, "root@example.com", "rootadmin", Role::Admin).await;
    let token = login(&server, "root@example.com").await;

    let (name, value) = bearer(&token);
    let response = server.get("/api/admin/users").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
}
