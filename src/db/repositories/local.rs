//! In-memory repository implementation.
//!
//! Used for unit tests and local development without a database. Semantics
//! mirror the Postgres implementation: ids are assigned from a monotonically
//! increasing counter, listings come back newest first, and mutating a
//! missing row reports `NotFound` from the write itself.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::api::{Item, ItemId, NewItem, TitleFilter};
use crate::db::repository::{ErrorContext, ItemRepository, RepositoryError, RepositoryResult};

#[derive(Debug, Default)]
struct Store {
    items: BTreeMap<i64, Item>,
    next_id: i64,
}

/// In-memory item store guarded by a read-write lock.
#[derive(Debug, Default)]
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items currently stored.
    pub fn len(&self) -> usize {
        self.store.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().items.is_empty()
    }

    fn not_found(operation: &str, id: ItemId) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Item {} not found", id),
            ErrorContext::new(operation).with_item_id(id.value()),
        )
    }
}

#[async_trait]
impl ItemRepository for LocalRepository {
    async fn list_items(&self, filter: Option<&TitleFilter>) -> RepositoryResult<Vec<Item>> {
        let store = self.store.read();

        let mut items: Vec<Item> = store
            .items
            .values()
            .filter(|item| filter.map_or(true, |f| f.matches(&item.title)))
            .cloned()
            .collect();

        // Newest first; id breaks ties so the order is total
        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(items)
    }

    async fn create_item(&self, new: &NewItem) -> RepositoryResult<Item> {
        let mut store = self.store.write();

        store.next_id += 1;
        let item = Item {
            id: ItemId::new(store.next_id),
            title: new.title.clone(),
            created_at: Utc::now(),
        };
        store.items.insert(item.id.value(), item.clone());

        Ok(item)
    }

    async fn update_item(&self, id: ItemId, title: &str) -> RepositoryResult<Item> {
        let mut store = self.store.write();

        let item = store
            .items
            .get_mut(&id.value())
            .ok_or_else(|| Self::not_found("update_item", id))?;
        item.title = title.to_string();

        Ok(item.clone())
    }

    async fn delete_item(&self, id: ItemId) -> RepositoryResult<Item> {
        let mut store = self.store.write();

        store
            .items
            .remove(&id.value())
            .ok_or_else(|| Self::not_found("delete_item", id))
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
