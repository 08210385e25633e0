//! Droid operations. Same shape as characters, except listing is always paginated and there is
//! no search.

use super::validation::RequestValidator;
use crate::error::AppError;
use crate::model::{Droid, Page, PathId};
use crate::store::Store;
use serde_json::Value;

const ENTITY: &str = "Droid";

pub struct DroidService;

impl DroidService {
    pub async fn list(store: &dyn Store, page: Page) -> Result<Vec<Droid>, AppError> {
        let rows = store.list_droids(page).await.inspect_err(|e| {
            tracing::error!(op = "list_droids", limit = page.limit, offset = page.offset, error = %e, "error getting droids")
        })?;
        Ok(rows)
    }

    pub async fn create(store: &dyn Store, body: &Value) -> Result<i64, AppError> {
        let new = RequestValidator::droid(body).inspect_err(|e| {
            tracing::warn!(op = "create_droid", %body, error = %e, "rejected droid payload")
        })?;
        let id = store.insert_droid(&new).await.inspect_err(|e| {
            tracing::error!(op = "create_droid", droid = %new.name, error = %e, "error creating droid")
        })?;
        tracing::info!(id, "droid created");
        Ok(id)
    }

    pub async fn update(store: &dyn Store, id: &PathId, body: &Value) -> Result<(), AppError> {
        let existing = match id.as_id() {
            Some(n) => store.find_droid(n).await.inspect_err(|e| {
                tracing::error!(op = "update_droid", id = n, error = %e, "error checking droid existence")
            })?,
            None => None,
        };
        let Some(existing) = existing else {
            tracing::warn!(op = "update_droid", %id, "droid not found");
            return Err(AppError::NotFound(ENTITY));
        };
        let new = RequestValidator::droid(body).inspect_err(|e| {
            tracing::warn!(op = "update_droid", id = existing.id, %body, error = %e, "rejected droid payload")
        })?;
        let affected = store.update_droid(existing.id, &new).await.inspect_err(|e| {
            tracing::error!(op = "update_droid", id = existing.id, error = %e, "error updating droid")
        })?;
        if affected == 0 {
            tracing::warn!(op = "update_droid", id = existing.id, "droid vanished before update");
        }
        Ok(())
    }

    pub async fn delete(store: &dyn Store, id: &PathId) -> Result<(), AppError> {
        let Some(n) = id.as_id() else {
            return Ok(());
        };
        let affected = store.delete_droid(n).await.inspect_err(|e| {
            tracing::error!(op = "delete_droid", id = n, error = %e, "error deleting droid")
        })?;
        tracing::debug!(id = n, affected, "droid delete");
        Ok(())
    }
}
