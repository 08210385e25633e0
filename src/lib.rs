//! Star Wars API: REST resources for characters and droids over a relational store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{ServerConfig, StoreBackend};
pub use error::{AppError, ConfigError};
pub use model::{Character, Droid, PathId};
pub use routes::app;
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Store, StoreError};
