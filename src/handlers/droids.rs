//! `/droids` handlers: list, create, update, delete.

use super::payload;
use crate::error::AppError;
use crate::model::{Droid, PathId};
use crate::response::{created, ok, AckId, DroidAck};
use crate::service::{pagination, DroidService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

/// GET /droids. `limit`/`offset` always apply (10/0 when absent).
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Droid>>, AppError> {
    let rows = DroidService::list(state.store.as_ref(), pagination::page(&params)).await?;
    Ok(Json(rows))
}

pub async fn create(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<impl IntoResponse, AppError> {
    let id = DroidService::create(state.store.as_ref(), &payload(body)).await?;
    Ok(created(DroidAck {
        message: "Droid created successfully",
        droid_id: AckId::Generated(id),
    }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> Result<impl IntoResponse, AppError> {
    let id = PathId::parse(&id);
    DroidService::update(state.store.as_ref(), &id, &payload(body)).await?;
    Ok(ok(DroidAck {
        message: "Droid updated successfully",
        droid_id: AckId::Path(id),
    }))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = PathId::parse(&id);
    DroidService::delete(state.store.as_ref(), &id).await?;
    Ok(ok(DroidAck {
        message: "Droid deleted successfully",
        droid_id: AckId::Path(id),
    }))
}
