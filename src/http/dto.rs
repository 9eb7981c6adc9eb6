//! Data Transfer Objects for the HTTP API.
//!
//! The item record itself already serializes to the wire shape, so it is
//! re-exported; this module adds the request and query types.

use serde::{Deserialize, Serialize};

pub use crate::api::Item;

/// Request body for creating an item.
///
/// `title` is optional at the serde level so a missing field surfaces as a
/// validation error (400) in the handler instead of a deserialization
/// rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// Request body for updating an item's title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// Query parameters for the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListItemsQuery {
    /// Substring to match against titles (optional)
    #[serde(default)]
    pub search: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
