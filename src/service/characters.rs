//! Character operations: list, search, create, update, delete.

use super::validation::RequestValidator;
use crate::error::AppError;
use crate::model::{Character, Page, PathId};
use crate::store::Store;
use serde_json::Value;

const ENTITY: &str = "Character";

pub struct CharacterService;

impl CharacterService {
    /// `None` returns the whole table.
    pub async fn list(store: &dyn Store, page: Option<Page>) -> Result<Vec<Character>, AppError> {
        let rows = store.list_characters(page).await.inspect_err(|e| {
            tracing::error!(op = "list_characters", ?page, error = %e, "error getting characters")
        })?;
        Ok(rows)
    }

    pub async fn search(store: &dyn Store, name: &str) -> Result<Vec<Character>, AppError> {
        let rows = store.search_characters(name).await.inspect_err(|e| {
            tracing::error!(op = "search_characters", query = name, error = %e, "error searching characters")
        })?;
        Ok(rows)
    }

    /// Validate then insert. Returns the generated id.
    pub async fn create(store: &dyn Store, body: &Value) -> Result<i64, AppError> {
        let new = RequestValidator::character(body).inspect_err(|e| {
            tracing::warn!(op = "create_character", %body, error = %e, "rejected character payload")
        })?;
        let id = store.insert_character(&new).await.inspect_err(|e| {
            tracing::error!(op = "create_character", character = %new.name, error = %e, "error creating character")
        })?;
        tracing::info!(id, "character created");
        Ok(id)
    }

    /// Existence is checked before the payload is validated: an unknown id is a 404 whatever the body.
    pub async fn update(store: &dyn Store, id: &PathId, body: &Value) -> Result<(), AppError> {
        let existing = match id.as_id() {
            Some(n) => store.find_character(n).await.inspect_err(|e| {
                tracing::error!(op = "update_character", id = n, error = %e, "error checking character existence")
            })?,
            None => None,
        };
        let Some(existing) = existing else {
            tracing::warn!(op = "update_character", %id, "character not found");
            return Err(AppError::NotFound(ENTITY));
        };
        let new = RequestValidator::character(body).inspect_err(|e| {
            tracing::warn!(op = "update_character", id = existing.id, %body, error = %e, "rejected character payload")
        })?;
        let affected = store
            .update_character(existing.id, &new)
            .await
            .inspect_err(|e| {
                tracing::error!(op = "update_character", id = existing.id, error = %e, "error updating character")
            })?;
        if affected == 0 {
            tracing::warn!(op = "update_character", id = existing.id, "character vanished before update");
        }
        Ok(())
    }

    /// Unconditional: deleting an id that does not exist still succeeds.
    pub async fn delete(store: &dyn Store, id: &PathId) -> Result<(), AppError> {
        let Some(n) = id.as_id() else {
            return Ok(());
        };
        let affected = store.delete_character(n).await.inspect_err(|e| {
            tracing::error!(op = "delete_character", id = n, error = %e, "error deleting character")
        })?;
        tracing::debug!(id = n, affected, "character delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn leia() -> Value {
        json!({"name": "Leia", "description": "Princess", "age": 19})
    }

    #[tokio::test]
    async fn create_persists_valid_rows_only() {
        let store = MemoryStore::new();
        let id = CharacterService::create(&store, &leia()).await.unwrap();
        assert_matches!(
            CharacterService::create(&store, &json!({"name": "R2", "description": "x", "age": 1})).await,
            Err(AppError::Validation(_))
        );
        let rows = CharacterService::list(&store, None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].name, "Leia");
    }

    #[tokio::test]
    async fn update_checks_existence_before_validation() {
        let store = MemoryStore::new();
        let bad = json!({"name": "Leia2"});
        assert_matches!(
            CharacterService::update(&store, &PathId::from(42), &bad).await,
            Err(AppError::NotFound("Character"))
        );
        assert_matches!(
            CharacterService::update(&store, &PathId::parse("abc"), &bad).await,
            Err(AppError::NotFound(_))
        );
        let id = CharacterService::create(&store, &leia()).await.unwrap();
        assert_matches!(
            CharacterService::update(&store, &PathId::from(id), &bad).await,
            Err(AppError::Validation(_))
        );
    }

    #[tokio::test]
    async fn update_overwrites_all_fields() {
        let store = MemoryStore::new();
        let id = CharacterService::create(&store, &leia()).await.unwrap();
        CharacterService::update(
            &store,
            &PathId::from(id),
            &json!({"name": "General Organa", "description": "General", "age": 53}),
        )
        .await
        .unwrap();
        let row = store.find_character(id).await.unwrap().unwrap();
        assert_eq!(row.name, "General Organa");
        assert_eq!(row.description, "General");
        assert_eq!(row.age, 53);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let id = CharacterService::create(&store, &leia()).await.unwrap();
        CharacterService::delete(&store, &PathId::from(id)).await.unwrap();
        CharacterService::delete(&store, &PathId::from(id)).await.unwrap();
        CharacterService::delete(&store, &PathId::parse("nope")).await.unwrap();
        assert!(CharacterService::list(&store, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_failures_surface_as_store_errors() {
        let store = MemoryStore::failing("boom");
        assert_matches!(
            CharacterService::search(&store, "").await,
            Err(AppError::Store(_))
        );
        assert_matches!(
            CharacterService::delete(&store, &PathId::from(1)).await,
            Err(AppError::Store(_))
        );
        assert_matches!(
            CharacterService::update(&store, &PathId::from(1), &leia()).await,
            Err(AppError::Store(_))
        );
    }
}
