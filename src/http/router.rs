//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! static asset serving, and creates the axum router ready for serving.

use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
///
/// `static_dir` is the directory the browser client is served from; requests
/// that match no API route fall through to it (with `index.html` at `/`).
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Item CRUD
    let api = Router::new()
        .route(
            "/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/items/{id}",
            axum::routing::put(handlers::update_item).delete(handlers::delete_item),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        // Markup, styles, and client script
        .fallback_service(ServeDir::new(static_dir))
        // Item payloads are tiny; anything bigger is a mistake
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
