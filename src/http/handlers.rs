//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for validation and persistence. Handlers re-validate input
//! regardless of any checks the browser client performed.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateItemRequest, HealthResponse, ListItemsQuery, UpdateItemRequest};
use super::error::AppError;
use super::state::AppState;
use crate::api::{Item, ItemId};
use crate::db::services as db_services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the database
/// is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Item CRUD
// =============================================================================

/// GET /api/items
///
/// List all items newest first, optionally narrowed by a `search` substring
/// against titles.
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListItemsQuery>,
) -> HandlerResult<Vec<Item>> {
    let items = db_services::list_items(
        state.repository.as_ref(),
        query.search.as_deref(),
        state.match_mode,
    )
    .await?;

    Ok(Json(items))
}

/// POST /api/items
///
/// Create a new item from the request title. Returns 201 with the stored
/// record, or 400 when the title is missing or blank.
pub async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let title = request
        .title
        .ok_or_else(|| AppError::BadRequest("Title is required".to_string()))?;

    let item = db_services::create_item(state.repository.as_ref(), &title).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/items/{id}
///
/// Replace the title of an existing item. Returns the updated record, 400
/// when the title is missing or blank, or 404 when no item has the id at
/// write time.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateItemRequest>,
) -> HandlerResult<Item> {
    let title = request
        .title
        .ok_or_else(|| AppError::BadRequest("Title is required".to_string()))?;

    let item = db_services::update_item(state.repository.as_ref(), ItemId::new(id), &title).await?;

    Ok(Json(item))
}

/// DELETE /api/items/{id}
///
/// Remove an item. Returns the deleted record's last-known values, or 404
/// when no item has the id at write time.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Item> {
    let item = db_services::delete_item(state.repository.as_ref(), ItemId::new(id)).await?;

    Ok(Json(item))
}
