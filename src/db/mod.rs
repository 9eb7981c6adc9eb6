//! Database module for item storage.
//!
//! This module provides abstractions for database operations via the
//! Repository pattern, allowing different storage backends to be swapped
//! easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Title validation and trimming                        │
//! │  - Search normalization                                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/)                         │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────┬───────────────────────┐
//!     │   Postgres Repository    │   Local Repository    │
//!     │     (Diesel + r2d2)      │      (in-memory)      │
//!     └──────────────────────────┴───────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! **For new code, use the service layer:**
//! ```ignore
//! use itemdeck::api::MatchMode;
//! use itemdeck::db::{factory::RepositoryFactory, services};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env().await?;
//!     let items = services::list_items(repo.as_ref(), None, MatchMode::default()).await?;
//!     Ok(())
//! }
//! ```

// Feature flag priority: postgres > local
// When multiple features are enabled (e.g., --all-features), postgres takes precedence.
#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

#[cfg(test)]
#[path = "services_tests.rs"]
mod services_tests;

// Postgres config is colocated with the repository implementation.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::{PoolStats, PostgresConfig};

// ==================== Service Layer (Recommended for new code) ====================
// Use these high-level functions that work with any repository implementation

pub use services::{create_item, delete_item, health_check, list_items, update_item};

// ==================== Repository Pattern Exports ====================

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::{resolve_match_mode, RepositoryConfig};
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{ErrorContext, ItemRepository, RepositoryError, RepositoryResult};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn ItemRepository>> = OnceLock::new();

/// Create the repository selected by runtime configuration.
///
/// A TOML file named by `ITEMDECK_CONFIG` wins; otherwise the environment
/// variables drive the factory (see [`RepositoryType::from_env`]).
async fn create_selected_repository() -> RepositoryResult<Arc<dyn ItemRepository>> {
    match std::env::var(repo_config::CONFIG_PATH_VAR) {
        Ok(path) => RepositoryFactory::from_config_file(path).await,
        Err(_) => RepositoryFactory::from_env().await,
    }
}

/// Initialize the global repository singleton for the selected backend.
///
/// Safe to call more than once; later calls are no-ops.
pub async fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = create_selected_repository()
        .await
        .map_err(|e| anyhow::Error::msg(e.to_string()))?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn ItemRepository>> {
    REPOSITORY
        .get()
        .context("Database not initialized. Call init_repository() first.")
}
