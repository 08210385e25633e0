//! Shared helpers for HTTP-level tests: build the router over a store and drive it with
//! `tower::ServiceExt::oneshot`, no TCP listener.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use starwars_api::{app, AppState, Store};
use std::sync::Arc;
use tower::ServiceExt;

pub const BODY_LIMIT: usize = 100 * 1024;

/// Router over `store`. Keep the `Arc` to share one store across several requests.
pub fn build_test_app(store: Arc<dyn Store>) -> Router {
    app(AppState { store }, BODY_LIMIT)
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body.to_string()).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body.to_string()).await
}

/// Sends `raw` verbatim with a JSON content type, for malformed-body cases.
pub async fn send_json(app: &Router, method: Method, uri: &str, raw: String) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(raw))
            .unwrap(),
    )
    .await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Status plus parsed body.
pub async fn status_json(response: Response<Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    (status, body_json(response).await)
}
