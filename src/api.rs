//! Public API surface for the item backend.
//!
//! This file consolidates the domain types shared by the repository, service,
//! and HTTP layers. All wire-facing types derive Serialize/Deserialize for
//! JSON serialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Item identifier (database primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ItemId(pub i64);

impl ItemId {
    pub fn new(value: i64) -> Self {
        ItemId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ItemId> for i64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        ItemId(value)
    }
}

/// A persisted item record.
///
/// `created_at` is assigned by the repository on creation and is immutable;
/// it is the sole sort key for listings (newest first). Serialized field
/// names follow the wire contract (`createdAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new item.
///
/// The title is stored as given; callers go through
/// `db::services::create_item`, which trims and validates first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    pub title: String,
}

impl NewItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Substring filter applied to item titles when listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleFilter {
    /// Substring to look for in titles.
    pub needle: String,
    /// How the comparison treats letter case.
    pub mode: MatchMode,
}

impl TitleFilter {
    pub fn new(needle: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            needle: needle.into(),
            mode,
        }
    }

    /// Whether `title` satisfies this filter.
    pub fn matches(&self, title: &str) -> bool {
        match self.mode {
            MatchMode::CaseSensitive => title.contains(&self.needle),
            MatchMode::CaseInsensitive => title
                .to_lowercase()
                .contains(&self.needle.to_lowercase()),
        }
    }
}

/// Case behavior of title search.
///
/// Relational backends disagree on a default collation for substring
/// matching, so the choice is an explicit configuration value instead of
/// whatever the engine happens to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    CaseSensitive,
    #[default]
    CaseInsensitive,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "case-sensitive" | "sensitive" => Ok(Self::CaseSensitive),
            "case-insensitive" | "insensitive" => Ok(Self::CaseInsensitive),
            _ => Err(format!("Unknown match mode: {}", s)),
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CaseSensitive => write!(f, "case-sensitive"),
            Self::CaseInsensitive => write!(f, "case-insensitive"),
        }
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
