//! Persistence gateway: the only code that talks to the relational store.
//!
//! Handlers hold an `Arc<dyn Store>`; production wires in [`PgStore`], tests and local runs can
//! use [`MemoryStore`]. Each call is a single step that either succeeds or fails; there are no
//! retries and no transactions.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, ensure_tables, PgStore};

use crate::model::{Character, Droid, NewCharacter, NewDroid, Page};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// The driver's own message, without the error chain. Safe to hand to clients.
    pub fn details(&self) -> String {
        match self {
            StoreError::Db(sqlx::Error::Database(db)) => db.message().to_string(),
            StoreError::Db(e) => e.to_string(),
            StoreError::Unavailable(msg) => msg.clone(),
        }
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    /// `None` returns the whole table.
    async fn list_characters(&self, page: Option<Page>) -> Result<Vec<Character>, StoreError>;
    /// Rows whose name contains `needle` literally. An empty needle matches every row.
    async fn search_characters(&self, needle: &str) -> Result<Vec<Character>, StoreError>;
    async fn find_character(&self, id: i64) -> Result<Option<Character>, StoreError>;
    /// Returns the generated id.
    async fn insert_character(&self, new: &NewCharacter) -> Result<i64, StoreError>;
    /// Returns the affected-row count.
    async fn update_character(&self, id: i64, new: &NewCharacter) -> Result<u64, StoreError>;
    async fn delete_character(&self, id: i64) -> Result<u64, StoreError>;

    async fn list_droids(&self, page: Page) -> Result<Vec<Droid>, StoreError>;
    async fn find_droid(&self, id: i64) -> Result<Option<Droid>, StoreError>;
    async fn insert_droid(&self, new: &NewDroid) -> Result<i64, StoreError>;
    async fn update_droid(&self, id: i64, new: &NewDroid) -> Result<u64, StoreError>;
    async fn delete_droid(&self, id: i64) -> Result<u64, StoreError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
