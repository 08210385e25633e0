//! In-memory [`Store`] with the same contract as the PostgreSQL one.

use super::{Store, StoreError};
use crate::model::{Character, Droid, NewCharacter, NewDroid, Page};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Table {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn page(&self, page: Option<Page>) -> Vec<T> {
        let rows = self.rows.values().cloned();
        match page {
            Some(p) => rows
                .skip(usize::try_from(p.offset).unwrap_or(usize::MAX))
                .take(usize::try_from(p.limit).unwrap_or(0))
                .collect(),
            None => rows.collect(),
        }
    }

    fn insert(&mut self, make: impl FnOnce(i64) -> T) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.insert(id, make(id));
        id
    }

    fn replace(&mut self, id: i64, make: impl FnOnce(i64) -> T) -> u64 {
        match self.rows.get_mut(&id) {
            Some(row) => {
                *row = make(id);
                1
            }
            None => 0,
        }
    }

    fn remove(&mut self, id: i64) -> u64 {
        u64::from(self.rows.remove(&id).is_some())
    }
}

struct Tables {
    characters: Table<Character>,
    droids: Table<Droid>,
}

/// Rows live in id order, so "store-native order" here is ascending id.
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failure: Option<String>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            tables: Mutex::new(Tables {
                characters: Table::new(),
                droids: Table::new(),
            }),
            failure: None,
        }
    }

    /// A store whose every operation fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        MemoryStore {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        if let Some(msg) = &self.failure {
            return Err(StoreError::Unavailable(msg.clone()));
        }
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_characters(&self, page: Option<Page>) -> Result<Vec<Character>, StoreError> {
        Ok(self.lock()?.characters.page(page))
    }

    async fn search_characters(&self, needle: &str) -> Result<Vec<Character>, StoreError> {
        Ok(self
            .lock()?
            .characters
            .rows
            .values()
            .filter(|c| c.name.contains(needle))
            .cloned()
            .collect())
    }

    async fn find_character(&self, id: i64) -> Result<Option<Character>, StoreError> {
        Ok(self.lock()?.characters.rows.get(&id).cloned())
    }

    async fn insert_character(&self, new: &NewCharacter) -> Result<i64, StoreError> {
        let new = new.clone();
        Ok(self.lock()?.characters.insert(|id| new.into_row(id)))
    }

    async fn update_character(&self, id: i64, new: &NewCharacter) -> Result<u64, StoreError> {
        let new = new.clone();
        Ok(self.lock()?.characters.replace(id, |id| new.into_row(id)))
    }

    async fn delete_character(&self, id: i64) -> Result<u64, StoreError> {
        Ok(self.lock()?.characters.remove(id))
    }

    async fn list_droids(&self, page: Page) -> Result<Vec<Droid>, StoreError> {
        Ok(self.lock()?.droids.page(Some(page)))
    }

    async fn find_droid(&self, id: i64) -> Result<Option<Droid>, StoreError> {
        Ok(self.lock()?.droids.rows.get(&id).cloned())
    }

    async fn insert_droid(&self, new: &NewDroid) -> Result<i64, StoreError> {
        let new = new.clone();
        Ok(self.lock()?.droids.insert(|id| new.into_row(id)))
    }

    async fn update_droid(&self, id: i64, new: &NewDroid) -> Result<u64, StoreError> {
        let new = new.clone();
        Ok(self.lock()?.droids.replace(id, |id| new.into_row(id)))
    }

    async fn delete_droid(&self, id: i64) -> Result<u64, StoreError> {
        Ok(self.lock()?.droids.remove(id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn character(name: &str) -> NewCharacter {
        NewCharacter {
            name: name.into(),
            description: "Jedi".into(),
            age: 19,
        }
    }

    #[tokio::test]
    async fn ids_are_generated_in_sequence() {
        let store = MemoryStore::new();
        assert_eq!(store.insert_character(&character("Luke")).await.unwrap(), 1);
        assert_eq!(store.insert_character(&character("Leia")).await.unwrap(), 2);
        store.delete_character(2).await.unwrap();
        assert_eq!(store.insert_character(&character("Han")).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn page_skips_then_takes() {
        let store = MemoryStore::new();
        for name in ["A", "B", "C", "D", "E"] {
            store.insert_character(&character(name)).await.unwrap();
        }
        let rows = store
            .list_characters(Some(Page { limit: 2, offset: 1 }))
            .await
            .unwrap();
        let names: Vec<_> = rows.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["B", "C"]);
        assert_eq!(store.list_characters(None).await.unwrap().len(), 5);
        assert!(store
            .list_characters(Some(Page { limit: 10, offset: 50 }))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn search_is_a_case_sensitive_substring_match() {
        let store = MemoryStore::new();
        store.insert_character(&character("Luke Skywalker")).await.unwrap();
        store.insert_character(&character("Anakin Skywalker")).await.unwrap();
        store.insert_character(&character("Leia")).await.unwrap();
        assert_eq!(store.search_characters("Skywalker").await.unwrap().len(), 2);
        assert!(store.search_characters("luke").await.unwrap().is_empty());
        assert_eq!(store.search_characters("").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_and_delete_report_affected_rows() {
        let store = MemoryStore::new();
        let id = store.insert_character(&character("Luke")).await.unwrap();
        assert_eq!(store.update_character(id, &character("Ben")).await.unwrap(), 1);
        assert_eq!(store.find_character(id).await.unwrap().unwrap().name, "Ben");
        assert_eq!(store.update_character(99, &character("Ben")).await.unwrap(), 0);
        assert_eq!(store.delete_character(id).await.unwrap(), 1);
        assert_eq!(store.delete_character(id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failing_store_fails_every_call() {
        let store = MemoryStore::failing("connection refused");
        assert_matches!(
            store.list_droids(Page { limit: 10, offset: 0 }).await,
            Err(StoreError::Unavailable(msg)) if msg == "connection refused"
        );
        assert_matches!(store.ping().await, Err(StoreError::Unavailable(_)));
    }
}
