//! `/characters` handlers: list, search, create, update, delete.

use super::payload;
use crate::error::AppError;
use crate::model::{Character, PathId};
use crate::response::{created, ok, AckId, CharacterAck};
use crate::service::{pagination, CharacterService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

/// GET /characters. Without `limit`/`offset` the whole table is returned.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Character>>, AppError> {
    let page = pagination::page_if_requested(&params);
    let rows = CharacterService::list(state.store.as_ref(), page).await?;
    Ok(Json(rows))
}

/// GET /characters/search?name=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Character>>, AppError> {
    let name = params.get("name").map(String::as_str).unwrap_or("");
    let rows = CharacterService::search(state.store.as_ref(), name).await?;
    Ok(Json(rows))
}

/// POST /characters
pub async fn create(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<impl IntoResponse, AppError> {
    let id = CharacterService::create(state.store.as_ref(), &payload(body)).await?;
    Ok(created(CharacterAck {
        message: "Character created successfully",
        character_id: AckId::Generated(id),
    }))
}

/// PUT /characters/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> Result<impl IntoResponse, AppError> {
    let id = PathId::parse(&id);
    CharacterService::update(state.store.as_ref(), &id, &payload(body)).await?;
    Ok(ok(CharacterAck {
        message: "Character updated successfully",
        character_id: AckId::Path(id),
    }))
}

/// DELETE /characters/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = PathId::parse(&id);
    CharacterService::delete(state.store.as_ref(), &id).await?;
    Ok(ok(CharacterAck {
        message: "Character deleted successfully",
        character_id: AckId::Path(id),
    }))
}
