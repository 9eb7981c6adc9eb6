//! High-level item operations over any repository implementation.
//!
//! Handlers call these functions instead of the repository directly so input
//! normalization and validation live in one place, independent of the HTTP
//! layer and of whatever checks the client performed.

use log::{debug, info};

use crate::api::{Item, ItemId, MatchMode, NewItem, TitleFilter};
use crate::db::repository::{ErrorContext, ItemRepository, RepositoryError, RepositoryResult};

/// Trim a title and reject it when nothing remains.
///
/// Runs before any persistence call; the stored title is always the trimmed
/// form.
fn normalized_title<'a>(title: &'a str, operation: &str) -> RepositoryResult<&'a str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(RepositoryError::ValidationError {
            message: "Title must not be empty".to_string(),
            context: ErrorContext::new(operation),
        });
    }
    Ok(trimmed)
}

/// List items, newest first, optionally narrowed by a title search.
///
/// The search string is trimmed; a string that is empty after trimming is
/// treated as no search at all.
pub async fn list_items(
    repo: &dyn ItemRepository,
    search: Option<&str>,
    mode: MatchMode,
) -> RepositoryResult<Vec<Item>> {
    let filter = search
        .map(str::trim)
        .filter(|needle| !needle.is_empty())
        .map(|needle| TitleFilter::new(needle, mode));

    let items = repo.list_items(filter.as_ref()).await?;
    debug!("Listed {} items (filter: {:?})", items.len(), filter);

    Ok(items)
}

/// Create an item from a raw title.
///
/// # Returns
/// * `Ok(Item)` - The stored record with assigned id and timestamp
/// * `Err(RepositoryError::ValidationError)` - If the title is empty after trimming
pub async fn create_item(repo: &dyn ItemRepository, title: &str) -> RepositoryResult<Item> {
    let title = normalized_title(title, "create_item")?;

    let item = repo.create_item(&NewItem::new(title)).await?;
    info!("Created item {} ({:?})", item.id, item.title);

    Ok(item)
}

/// Update an item's title.
///
/// # Returns
/// * `Ok(Item)` - The updated record re-read from storage
/// * `Err(RepositoryError::ValidationError)` - If the title is empty after trimming
/// * `Err(RepositoryError::NotFound)` - If no item has `id` at write time
pub async fn update_item(
    repo: &dyn ItemRepository,
    id: ItemId,
    title: &str,
) -> RepositoryResult<Item> {
    let title = normalized_title(title, "update_item")?;

    let item = repo.update_item(id, title).await?;
    info!("Updated item {} ({:?})", item.id, item.title);

    Ok(item)
}

/// Delete an item.
///
/// # Returns
/// * `Ok(Item)` - The deleted record's last-known values
/// * `Err(RepositoryError::NotFound)` - If no item has `id` at write time
pub async fn delete_item(repo: &dyn ItemRepository, id: ItemId) -> RepositoryResult<Item> {
    let item = repo.delete_item(id).await?;
    info!("Deleted item {}", item.id);

    Ok(item)
}

/// Probe repository connectivity.
pub async fn health_check(repo: &dyn ItemRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}
