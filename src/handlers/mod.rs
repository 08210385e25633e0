//! HTTP handlers for the character and droid resources.

pub mod characters;
pub mod droids;

use axum::Json;
use serde_json::Value;

/// A missing or malformed JSON body is treated as an empty payload, so it is rejected by
/// validation (after the existence check, for updates) rather than by the extractor.
fn payload(body: Option<Json<Value>>) -> Value {
    body.map(|Json(v)| v).unwrap_or(Value::Null)
}
