//! Health, readiness and version routes.

mod common;

use axum::http::StatusCode;
use common::{get, status_json};
use serde_json::json;
use starwars_api::{MemoryStore, Store};
use std::sync::Arc;

#[tokio::test]
async fn health_is_ok() {
    let app = common::build_test_app(Arc::new(MemoryStore::new()));
    let (status, json) = status_json(get(&app, "/health").await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"status": "ok"}));
}

#[tokio::test]
async fn ready_reflects_store_reachability() {
    let app = common::build_test_app(Arc::new(MemoryStore::new()));
    let (status, json) = status_json(get(&app, "/ready").await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"status": "ok", "database": "ok"}));

    let failing: Arc<dyn Store> = Arc::new(MemoryStore::failing("down"));
    let app = common::build_test_app(failing);
    let (status, json) = status_json(get(&app, "/ready").await).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json, json!({"status": "degraded", "database": "unavailable"}));
}

#[tokio::test]
async fn version_reports_crate_name() {
    let app = common::build_test_app(Arc::new(MemoryStore::new()));
    let (_, json) = status_json(get(&app, "/version").await).await;
    assert_eq!(json["name"], "starwars-api");
}
