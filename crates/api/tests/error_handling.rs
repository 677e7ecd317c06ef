//! Tests for the `AppError` -> HTTP response mapping.

mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use cybermind_api::error::{AppError, ResultExt};
use cybermind_core::error::{CoreError, FieldErrors};
use cybermind_db::StoreError;

async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    (status, common::body_json(response).await)
}

fn with_context(err: impl Into<AppError>, message: &'static str) -> AppError {
    Err::<(), _>(err).context(message).unwrap_err()
}

#[tokio::test]
async fn test_validation_error_carries_fields() {
    let mut fields = FieldErrors::new();
    fields.add("email", "Invalid email address");

    let (status, json) = render(with_context(
        CoreError::Validation(fields),
        "Failed to create contact",
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "Failed to create contact");
    assert_eq!(json["error"], "email: Invalid email address");
    assert_eq!(json["fields"]["email"][0], "Invalid email address");
}

#[tokio::test]
async fn test_not_found_maps_to_404() {
    let (status, json) = render(AppError::Core(CoreError::NotFound {
        entity: "Contact",
        id: "abc".to_string(),
    }))
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "Not Found");
    assert!(json.get("fields").is_none());
}

#[tokio::test]
async fn test_unauthorized_maps_to_401() {
    let (status, json) =
        render(AppError::Core(CoreError::Unauthorized("Missing token".into()))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing token");
}

#[tokio::test]
async fn test_internal_error_is_sanitized() {
    let err = StoreError::Query(sqlx::Error::Protocol(
        "password=secret connection string".into(),
    ));
    let (status, json) = render(with_context(err, "Failed to fetch contacts")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["message"], "Failed to fetch contacts");
    assert!(!json["error"].as_str().unwrap().contains("secret"));
}

#[tokio::test]
async fn test_connect_failure_maps_to_503() {
    let err = StoreError::Connect(sqlx::Error::PoolTimedOut);
    let (status, json) = render(with_context(err, "Failed to fetch contacts")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "SERVICE_UNAVAILABLE");
    assert_eq!(json["message"], "Failed to fetch contacts");
}

#[tokio::test]
async fn test_pool_timeout_during_query_maps_to_503() {
    let (status, _) = render(AppError::Store(StoreError::Query(sqlx::Error::PoolTimedOut))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unexpected_query_error_maps_to_500() {
    let err = StoreError::Query(sqlx::Error::Protocol("unexpected message".into()));
    let (status, json) = render(AppError::Store(err)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn test_outermost_context_wins() {
    let inner = with_context(CoreError::Unauthorized("bad".into()), "inner");
    let (status, json) = render(with_context(inner, "outer")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "outer");
    assert_eq!(json["error"], "bad");
}
