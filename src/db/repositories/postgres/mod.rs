//! Postgres repository implementation using Diesel.
//!
//! This module implements [`ItemRepository`] against a Postgres database.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Connection health monitoring
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::api::{Item, ItemId, MatchMode, NewItem, TitleFilter};
use crate::db::repository::{
    ErrorContext, ItemRepository, RepositoryError, RepositoryResult,
};

mod models;
mod schema;

use models::{ItemRow, NewItemRow};
use schema::items;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// See the module docs for the variable list. Fails when neither
    /// `DATABASE_URL` nor `PG_DATABASE_URL` is set.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        Ok(Self {
            database_url,
            max_pool_size: env_parsed("PG_POOL_MAX", 10),
            min_pool_size: env_parsed("PG_POOL_MIN", 1),
            connection_timeout_sec: env_parsed("PG_CONN_TIMEOUT_SEC", 30),
            idle_timeout_sec: env_parsed("PG_IDLE_TIMEOUT_SEC", 600),
            max_retries: env_parsed("PG_MAX_RETRIES", 3),
            retry_delay_ms: env_parsed("PG_RETRY_DELAY_MS", 100),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Total number of connections in the pool
    pub total_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
    /// Total retried operations
    pub retried_operations: u64,
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    // Metrics counters
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
    retried_operations: Arc<AtomicU64>,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    ///
    /// # Returns
    /// * `Ok(PostgresRepository)` on success
    /// * `Err(RepositoryError)` if connection or migration fails
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true) // Validate connections before use
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        // Run migrations once during initialization
        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self {
            pool,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
            retried_operations: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Execute a database operation with automatic retry for transient failures.
    ///
    /// Retries up to `max_retries` times when a retryable error occurs
    /// (connection errors, serialization failures). Not-found and validation
    /// errors are never retried, so from the caller's point of view every
    /// request still completes or fails exactly once.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();
        let retried_operations = self.retried_operations.clone();

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    retried_operations.fetch_add(1, Ordering::Relaxed);
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2; // Exponential backoff
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1))
                                .retryable(),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(err);
                    }
                };

                total_queries.fetch_add(1, Ordering::Relaxed);
                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => {
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(e);
                    }
                }
            }

            failed_queries.fetch_add(1, Ordering::Relaxed);
            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Get pool health statistics.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.retried_operations.load(Ordering::Relaxed),
        }
    }
}

/// Escape LIKE metacharacters so the needle is matched literally.
fn escape_like(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Map a write error, turning Diesel's not-found signal into a contextful
/// `NotFound`. The absence check is the write itself, not a prior lookup.
fn map_write_error(err: diesel::result::Error, operation: &str, id: ItemId) -> RepositoryError {
    match err {
        diesel::result::Error::NotFound => RepositoryError::not_found_with_context(
            format!("Item {} not found", id),
            ErrorContext::new(operation).with_item_id(id.value()),
        ),
        other => RepositoryError::from(other).with_operation(operation),
    }
}

#[async_trait]
impl ItemRepository for PostgresRepository {
    async fn list_items(&self, filter: Option<&TitleFilter>) -> RepositoryResult<Vec<Item>> {
        let filter = filter.cloned();

        let rows: Vec<ItemRow> = self
            .with_conn(move |conn| {
                let mut query = items::table.into_boxed();

                if let Some(ref f) = filter {
                    let pattern = format!("%{}%", escape_like(&f.needle));
                    query = match f.mode {
                        MatchMode::CaseSensitive => query.filter(items::title.like(pattern)),
                        MatchMode::CaseInsensitive => query.filter(items::title.ilike(pattern)),
                    };
                }

                query
                    .order((items::created_at.desc(), items::id.desc()))
                    .select(ItemRow::as_select())
                    .load(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("list_items"))
            })
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_item(&self, new: &NewItem) -> RepositoryResult<Item> {
        let new_row = NewItemRow {
            title: new.title.clone(),
        };

        let row: ItemRow = self
            .with_conn(move |conn| {
                diesel::insert_into(items::table)
                    .values(new_row.clone())
                    .returning(ItemRow::as_returning())
                    .get_result(conn)
                    .map_err(|e| RepositoryError::from(e).with_operation("create_item"))
            })
            .await?;

        Ok(row.into())
    }

    async fn update_item(&self, id: ItemId, title: &str) -> RepositoryResult<Item> {
        let title = title.to_string();

        let row: ItemRow = self
            .with_conn(move |conn| {
                diesel::update(items::table.find(id.value()))
                    .set(items::title.eq(title.clone()))
                    .returning(ItemRow::as_returning())
                    .get_result(conn)
                    .map_err(|e| map_write_error(e, "update_item", id))
            })
            .await?;

        Ok(row.into())
    }

    async fn delete_item(&self, id: ItemId) -> RepositoryResult<Item> {
        let row: ItemRow = self
            .with_conn(move |conn| {
                diesel::delete(items::table.find(id.value()))
                    .returning(ItemRow::as_returning())
                    .get_result(conn)
                    .map_err(|e| map_write_error(e, "delete_item", id))
            })
            .await?;

        Ok(row.into())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("health_check"))
        })
        .await?;

        Ok(true)
    }
}
