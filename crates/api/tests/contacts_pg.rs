//! `/api/contacts` over the PostgreSQL store.
//!
//! Same requests as `contacts_api.rs`, but through the production SQL. These
//! need a running database (`DATABASE_URL`) and are ignored by default:
//!
//! ```sh
//! cargo test -p cybermind-api --test contacts_pg -- --ignored
//! ```

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, delete_json, get, post_json, put_json};
use cybermind_db::{DbConfig, PgContactStore};
use serde_json::json;
use sqlx::PgPool;

const CONTACTS: &str = "/api/contacts";

fn pg_app(pool: PgPool) -> Router {
    let store = PgContactStore::from_pool(DbConfig::new("postgres://unused"), pool);
    common::build_test_app_with_store(common::test_config(), Arc::new(store))
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_crud_cycle_over_postgres(pool: PgPool) {
    let app = pg_app(pool);

    let response = post_json(
        app.clone(),
        CONTACTS,
        json!({
            "name": " Ada ",
            "email": "ada@example.com",
            "phone": "555-0100",
            "message": "Need a model",
            "projectType": "AI Model"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["name"], "Ada");
    assert_eq!(created["priority"], "Medium");

    // Priority only: every other column keeps its value.
    let updated = body_json(
        put_json(
            app.clone(),
            CONTACTS,
            json!({ "_id": created["_id"], "priority": "High" }),
        )
        .await,
    )
    .await;
    assert_eq!(updated["priority"], "High");
    for field in ["name", "email", "phone", "message", "projectType", "createdAt"] {
        assert_eq!(updated[field], created[field], "field {field} changed");
    }

    // An empty phone clears it.
    let cleared = body_json(
        put_json(app.clone(), CONTACTS, json!({ "_id": created["_id"], "phone": "" })).await,
    )
    .await;
    assert!(cleared["phone"].is_null());
    assert_eq!(cleared["priority"], "High");

    let listed = body_json(get(app.clone(), CONTACTS).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let response = delete_json(app.clone(), CONTACTS, json!({ "_id": created["_id"] })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed = body_json(get(app, CONTACTS).await).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_of_unknown_id_over_postgres_returns_404(pool: PgPool) {
    let response = put_json(
        pg_app(pool),
        CONTACTS,
        json!({ "_id": "0190f5b2-7c1a-7d3e-9a4b-5c6d7e8f9a0b", "name": "B" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
