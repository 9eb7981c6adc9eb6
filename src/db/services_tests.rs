use super::repositories::LocalRepository;
use super::repository::RepositoryError;
use super::services;
use crate::api::{ItemId, MatchMode};

#[tokio::test]
async fn test_create_stores_trimmed_title() {
    let repo = LocalRepository::new();

    let item = services::create_item(&repo, "  Groceries  ").await.unwrap();
    assert_eq!(item.title, "Groceries");

    let items = services::list_items(&repo, None, MatchMode::default())
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Groceries");
}

#[tokio::test]
async fn test_create_rejects_empty_title() {
    let repo = LocalRepository::new();

    let err = services::create_item(&repo, "").await.unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    let err = services::create_item(&repo, "   \t ").await.unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    // Nothing was persisted
    assert!(services::list_items(&repo, None, MatchMode::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let repo = LocalRepository::new();

    let first = services::create_item(&repo, "first").await.unwrap();
    let second = services::create_item(&repo, "second").await.unwrap();
    let third = services::create_item(&repo, "third").await.unwrap();

    let items = services::list_items(&repo, None, MatchMode::default())
        .await
        .unwrap();
    let ids: Vec<_> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[tokio::test]
async fn test_update_rejects_empty_title_and_leaves_row_unchanged() {
    let repo = LocalRepository::new();
    let item = services::create_item(&repo, "Original").await.unwrap();

    let err = services::update_item(&repo, item.id, "   ").await.unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    let items = services::list_items(&repo, None, MatchMode::default())
        .await
        .unwrap();
    assert_eq!(items[0].title, "Original");
}

#[tokio::test]
async fn test_update_missing_item_is_not_found() {
    let repo = LocalRepository::new();

    let err = services::update_item(&repo, ItemId::new(42), "anything")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_update_round_trip() {
    let repo = LocalRepository::new();
    let item = services::create_item(&repo, "Alpha").await.unwrap();

    let updated = services::update_item(&repo, item.id, "Beta").await.unwrap();
    assert_eq!(updated.id, item.id);
    assert_eq!(updated.title, "Beta");
    assert_eq!(updated.created_at, item.created_at);

    let items = services::list_items(&repo, None, MatchMode::default())
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Beta");
    assert!(items.iter().all(|i| i.title != "Alpha"));
}

#[tokio::test]
async fn test_delete_returns_last_known_values() {
    let repo = LocalRepository::new();
    let item = services::create_item(&repo, "Ephemeral").await.unwrap();

    let deleted = services::delete_item(&repo, item.id).await.unwrap();
    assert_eq!(deleted, item);

    // Second delete hits the not-found signal
    let err = services::delete_item(&repo, item.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_sequential_deletes_keep_earlier_removals() {
    let repo = LocalRepository::new();
    let keep = services::create_item(&repo, "keep").await.unwrap();
    let doomed = services::create_item(&repo, "doomed").await.unwrap();

    // Client-style batch: one delete per id, stop at the first failure,
    // earlier removals stay committed.
    services::delete_item(&repo, doomed.id).await.unwrap();
    let err = services::delete_item(&repo, ItemId::new(9999)).await.unwrap_err();
    assert!(err.is_not_found());

    let items = services::list_items(&repo, None, MatchMode::default())
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, keep.id);
}

#[tokio::test]
async fn test_search_filters_by_substring() {
    let repo = LocalRepository::new();
    services::create_item(&repo, "Alpha Project").await.unwrap();
    services::create_item(&repo, "Beta Task").await.unwrap();

    let items = services::list_items(&repo, Some("Alpha"), MatchMode::CaseInsensitive)
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Alpha Project");
}

#[tokio::test]
async fn test_search_match_mode_is_honored() {
    let repo = LocalRepository::new();
    services::create_item(&repo, "Alpha Project").await.unwrap();

    let hits = services::list_items(&repo, Some("alpha"), MatchMode::CaseInsensitive)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);

    let misses = services::list_items(&repo, Some("alpha"), MatchMode::CaseSensitive)
        .await
        .unwrap();
    assert!(misses.is_empty());
}

#[tokio::test]
async fn test_blank_search_means_no_filter() {
    let repo = LocalRepository::new();
    services::create_item(&repo, "one").await.unwrap();
    services::create_item(&repo, "two").await.unwrap();

    let items = services::list_items(&repo, Some("   "), MatchMode::default())
        .await
        .unwrap();
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_health_check() {
    let repo = LocalRepository::new();
    assert!(services::health_check(&repo).await.unwrap());
}
