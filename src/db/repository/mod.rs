//! Repository trait for item persistence.
//!
//! The trait is the seam between the service layer and concrete storage
//! backends. Two implementations exist: `PostgresRepository` (Diesel) and
//! `LocalRepository` (in-memory).

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::{Item, ItemId, NewItem, TitleFilter};

/// Storage operations for items.
///
/// Mutating operations detect a missing row via the persistence layer's own
/// not-found signal rather than a pre-check, so a concurrent delete between
/// lookup and write cannot slip through: the write itself reports
/// [`RepositoryError::NotFound`].
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// List items, newest first (`created_at` descending, ties broken by
    /// `id` descending).
    ///
    /// # Arguments
    /// * `filter` - Optional substring filter on titles; `None` returns all
    ///
    /// # Returns
    /// * `Ok(Vec<Item>)` - Matching items in listing order
    /// * `Err(RepositoryError)` - If the operation fails
    async fn list_items(&self, filter: Option<&TitleFilter>) -> RepositoryResult<Vec<Item>>;

    /// Persist a new item, assigning its id and creation timestamp.
    ///
    /// # Returns
    /// * `Ok(Item)` - The stored record as read back from storage
    /// * `Err(RepositoryError)` - If the operation fails
    async fn create_item(&self, new: &NewItem) -> RepositoryResult<Item>;

    /// Replace the title of an existing item.
    ///
    /// # Returns
    /// * `Ok(Item)` - The updated record with all fields re-read from storage
    /// * `Err(RepositoryError::NotFound)` - If no item has `id`
    async fn update_item(&self, id: ItemId, title: &str) -> RepositoryResult<Item>;

    /// Remove an item.
    ///
    /// # Returns
    /// * `Ok(Item)` - The deleted record's last-known values
    /// * `Err(RepositoryError::NotFound)` - If no item has `id`
    async fn delete_item(&self, id: ItemId) -> RepositoryResult<Item>;

    /// Probe backend connectivity.
    ///
    /// # Returns
    /// * `Ok(true)` - Backend reachable
    /// * `Err(RepositoryError)` - If the probe fails
    async fn health_check(&self) -> RepositoryResult<bool>;
}
