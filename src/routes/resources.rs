//! Character and droid CRUD routes.
//! `/characters/search` is a static segment, so it wins over `/characters/:id`.

use crate::handlers::{characters, droids};
use crate::state::AppState;
use axum::{
    routing::{get, put},
    Router,
};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/characters", get(characters::list).post(characters::create))
        .route("/characters/search", get(characters::search))
        .route(
            "/characters/:id",
            put(characters::update).delete(characters::delete),
        )
        .route("/droids", get(droids::list).post(droids::create))
        .route("/droids/:id", put(droids::update).delete(droids::delete))
        .with_state(state)
}
