//! Repository configuration file support.
//!
//! This module provides utilities for reading repository and search
//! configuration from TOML configuration files. The file location is given
//! by the `ITEMDECK_CONFIG` environment variable; when it is unset,
//! configuration falls back to individual environment variables.
//!
//! ```toml
//! [repository]
//! type = "postgres"
//!
//! [postgres]
//! database_url = "postgres://localhost/itemdeck"
//! max_connections = 10
//!
//! [search]
//! match = "case-insensitive"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::RepositoryError;
use crate::api::MatchMode;

/// Environment variable naming the TOML configuration file.
pub const CONFIG_PATH_VAR: &str = "ITEMDECK_CONFIG";

/// Environment variable overriding the search match mode.
pub const SEARCH_MATCH_VAR: &str = "SEARCH_MATCH";

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub postgres: PostgresSettings,
    #[serde(default)]
    pub search: SearchSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// Postgres connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostgresSettings {
    #[serde(default)]
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

/// Title search settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Case behavior: "case-sensitive" or "case-insensitive"
    #[serde(rename = "match", default)]
    pub match_mode: Option<String>,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: RepositoryConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// The configured repository type.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    /// The configured search match mode (defaults to case-insensitive).
    pub fn match_mode(&self) -> Result<MatchMode, RepositoryError> {
        match self.search.match_mode.as_deref() {
            Some(raw) => raw.parse().map_err(RepositoryError::configuration),
            None => Ok(MatchMode::default()),
        }
    }

    /// Convert the `[postgres]` section into a `PostgresConfig`.
    ///
    /// Returns `None` when no database URL is configured.
    #[cfg(feature = "postgres-repo")]
    pub fn to_postgres_config(&self) -> Option<super::PostgresConfig> {
        if self.postgres.database_url.is_empty() {
            return None;
        }

        Some(super::PostgresConfig {
            database_url: self.postgres.database_url.clone(),
            max_pool_size: self.postgres.max_connections,
            min_pool_size: self.postgres.min_connections,
            connection_timeout_sec: self.postgres.connect_timeout,
            idle_timeout_sec: self.postgres.idle_timeout,
            max_retries: self.postgres.max_retries,
            retry_delay_ms: self.postgres.retry_delay_ms,
        })
    }
}

/// Resolve the search match mode from configuration.
///
/// Order: `[search] match` in the `ITEMDECK_CONFIG` file when that variable
/// is set, then the `SEARCH_MATCH` environment variable, then the default
/// (case-insensitive). An unparseable value is a configuration error rather
/// than a silent fallback.
pub fn resolve_match_mode() -> Result<MatchMode, RepositoryError> {
    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        return RepositoryConfig::from_file(path)?.match_mode();
    }

    match std::env::var(SEARCH_MATCH_VAR) {
        Ok(raw) => raw.parse().map_err(RepositoryError::configuration),
        Err(_) => Ok(MatchMode::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [repository]
            type = "local"

            [postgres]
            database_url = "postgres://localhost/itemdeck"
            max_connections = 5

            [search]
            match = "case-sensitive"
        "#;

        let config: RepositoryConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
        assert_eq!(config.postgres.max_connections, 5);
        assert_eq!(config.match_mode().unwrap(), MatchMode::CaseSensitive);
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml_str = r#"
            [repository]
            type = "local"
        "#;

        let config: RepositoryConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
        // Section defaults apply when omitted
        assert_eq!(config.match_mode().unwrap(), MatchMode::CaseInsensitive);
    }

    #[test]
    fn test_invalid_match_mode_is_an_error() {
        let toml_str = r#"
            [repository]
            type = "local"

            [search]
            match = "fuzzy"
        "#;

        let config: RepositoryConfig = toml::from_str(toml_str).unwrap();
        assert!(config.match_mode().is_err());
    }

    #[test]
    fn test_invalid_repository_type() {
        let toml_str = r#"
            [repository]
            type = "mongo"
        "#;

        let config: RepositoryConfig = toml::from_str(toml_str).unwrap();
        assert!(config.repository_type().is_err());
    }
}
