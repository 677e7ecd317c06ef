//! Tests for the identity-provider gate on `/api/contacts`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json_auth};
use cybermind_api::auth::jwt::{Claims, JwtConfig};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

const SECRET: &str = "integration-test-secret-long-enough";

fn gated_app() -> axum::Router {
    let config = cybermind_api::config::ServerConfig {
        auth: Some(JwtConfig::hmac(SECRET)),
        ..common::test_config()
    };
    common::build_test_app_with(config)
}

fn token(secret: &str, exp_offset_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "user_2abc".to_string(),
        exp: now + exp_offset_secs,
        iat: Some(now),
        iss: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let response = get(gated_app(), "/api/contacts").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing Authorization header");
}

#[tokio::test]
async fn test_valid_token_is_accepted() {
    let app = gated_app();
    let token = token(SECRET, 600);

    let response = post_json_auth(
        app.clone(),
        "/api/contacts",
        json!({
            "name": "A",
            "email": "a@b.com",
            "message": "hi",
            "projectType": "AI Model"
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get_auth(app, "/api/contacts", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_token_signed_with_other_key_is_rejected() {
    let response = get_auth(gated_app(), "/api/contacts", &token("another-secret-entirely", 600)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let response = get_auth(gated_app(), "/api/contacts", &token(SECRET, -3600)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_not_gated() {
    let response = get(gated_app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_open_gate_without_key() {
    let response = get(common::build_test_app(), "/api/contacts").await;
    assert_eq!(response.status(), StatusCode::OK);
}
