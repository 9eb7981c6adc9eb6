use super::{Item, ItemId, MatchMode, TitleFilter};
use chrono::{TimeZone, Utc};

#[test]
fn test_item_id_new() {
    let id = ItemId::new(42);
    assert_eq!(id.value(), 42);
}

#[test]
fn test_item_id_equality() {
    let id1 = ItemId::new(100);
    let id2 = ItemId::new(100);
    let id3 = ItemId::new(101);

    assert_eq!(id1, id2);
    assert_ne!(id1, id3);
}

#[test]
fn test_item_id_ordering() {
    let id1 = ItemId::new(1);
    let id2 = ItemId::new(2);

    assert!(id1 < id2);
    assert!(id2 > id1);
}

#[test]
fn test_item_id_from_i64() {
    let id = ItemId::from(999);
    assert_eq!(id.0, 999);
    assert_eq!(i64::from(id), 999);
}

#[test]
fn test_item_id_hash() {
    use std::collections::HashSet;

    let mut set = HashSet::new();
    set.insert(ItemId::new(1));
    set.insert(ItemId::new(2));
    set.insert(ItemId::new(1)); // Duplicate

    assert_eq!(set.len(), 2);
}

#[test]
fn test_item_serializes_camel_case() {
    let item = Item {
        id: ItemId::new(7),
        title: "Groceries".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    };

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["title"], "Groceries");
    // Wire contract uses camelCase and ISO-8601 timestamps
    assert!(json.get("createdAt").is_some());
    assert!(json.get("created_at").is_none());
    assert!(json["createdAt"].as_str().unwrap().starts_with("2024-03-01T12:00:00"));
}

#[test]
fn test_item_round_trips_through_json() {
    let item = Item {
        id: ItemId::new(1),
        title: "Alpha".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
    };

    let json = serde_json::to_string(&item).unwrap();
    let back: Item = serde_json::from_str(&json).unwrap();
    assert_eq!(back, item);
}

#[test]
fn test_title_filter_case_sensitive() {
    let filter = TitleFilter::new("Alpha", MatchMode::CaseSensitive);

    assert!(filter.matches("Alpha Project"));
    assert!(!filter.matches("alpha project"));
    assert!(!filter.matches("Beta Task"));
}

#[test]
fn test_title_filter_case_insensitive() {
    let filter = TitleFilter::new("ALPHA", MatchMode::CaseInsensitive);

    assert!(filter.matches("Alpha Project"));
    assert!(filter.matches("alpha project"));
    assert!(!filter.matches("Beta Task"));
}

#[test]
fn test_match_mode_parsing() {
    assert_eq!(
        "case-sensitive".parse::<MatchMode>().unwrap(),
        MatchMode::CaseSensitive
    );
    assert_eq!(
        "INSENSITIVE".parse::<MatchMode>().unwrap(),
        MatchMode::CaseInsensitive
    );
    assert!("fuzzy".parse::<MatchMode>().is_err());
}

#[test]
fn test_match_mode_default_is_insensitive() {
    assert_eq!(MatchMode::default(), MatchMode::CaseInsensitive);
}
