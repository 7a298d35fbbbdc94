//! Property listing API integration tests

mod common;

use common::{bearer, login, seed_user, spawn_server, test_config};

use allnik::backend::auth::policy::Role;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;

fn property_body() -> serde_json::Value {
    serde_json::json!({
        "type": "house",
        "area": 140,
        "location": "Durres",
        "price": 250000,
        "paymentConditions": "mortgage ok",
    })
}

#[tokio::test]
async fn test_advisor_publishes_and_everyone_browses() {
    let (server, pool) = spawn_server(test_config()).await;
    let advisor = seed_user(&pool, "adv@example.com", "advisor", Role::Advisor).await;
    seed_user(&pool, "client@example.com", "client", Role::User).await;
    let advisor_token = login(&server, "adv@example.com").await;
    let client_token = login(&server, "client@example.com").await;

    let (name, value) = bearer(&advisor_token);
    let response = server
        .post("/api/properties")
        .add_header(name, value)
        .json(&property_body())
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    assert_eq!(created["advisorId"], advisor.id.to_string());
    assert_eq!(created["type"], "house");

    // Any authenticated user can browse
    let (name, value) = bearer(&client_token);
    let response = server.get("/api/properties").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let listings: serde_json::Value = response.json();
    assert_eq!(listings.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_user_cannot_publish() {
    let (server, pool) = spawn_server(test_config()).await;
    seed_user(&pool, "client@example.com", "client", Role::User).await;
    let token = login(&server, "client@example.com").await;

    let (name, value) = bearer(&token);
    let response = server
        .post("/api/properties")
        .add_header(name, value)
        .json(&property_body())
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_browse_requires_a_token() {
    let (server, _pool) = spawn_server(test_config()).await;
    let response = server.get("/api/properties").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_publish_validation() {
    let (server, pool) = spawn_server(test_config()).await;
    seed_user(&pool, "adv@example.com", "advisor", Role::Advisor).await;
    let token = login(&server, "adv@example.com").await;

    let mut bad_price = property_body();
    bad_price["price"] = 0.into();
    let (name, value) = bearer(&token);
    let response = server
        .post("/api/properties")
        .add_header(name, value)
        .json(&bad_price)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
