//! Acknowledgment bodies for writes.

use crate::model::PathId;
use axum::{http::StatusCode, Json};
use serde::Serialize;

/// POST answers with the generated id as a number; PUT/DELETE echo the path segment as text.
#[derive(Serialize)]
#[serde(untagged)]
pub enum AckId {
    Generated(i64),
    Path(PathId),
}

#[derive(Serialize)]
pub struct CharacterAck {
    pub message: &'static str,
    #[serde(rename = "characterId")]
    pub character_id: AckId,
}

#[derive(Serialize)]
pub struct DroidAck {
    pub message: &'static str,
    #[serde(rename = "droidId")]
    pub droid_id: AckId,
}

pub fn created<T: Serialize>(ack: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(ack))
}

pub fn ok<T: Serialize>(ack: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(ack))
}
