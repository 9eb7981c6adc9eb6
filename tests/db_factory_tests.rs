//! Tests for repository selection and configuration.

mod support;

use support::with_scoped_env;

use itemdeck::api::MatchMode;
use itemdeck::db::repo_config::{resolve_match_mode, RepositoryConfig};
use itemdeck::db::{ItemRepository, RepositoryFactory, RepositoryType};

#[test]
fn test_repository_type_defaults_to_local_without_database_url() {
    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );
}

#[test]
fn test_repository_type_prefers_postgres_when_url_present() {
    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", Some("postgres://localhost/itemdeck")),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Postgres);
        },
    );
}

#[test]
fn test_explicit_repository_type_wins_over_url() {
    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", Some("postgres://localhost/itemdeck")),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );
}

#[tokio::test]
async fn test_factory_creates_working_local_repository() {
    let repo = RepositoryFactory::create(RepositoryType::Local).await.unwrap();

    let item = itemdeck::db::create_item(repo.as_ref(), "from factory")
        .await
        .unwrap();
    assert_eq!(item.title, "from factory");
}

#[tokio::test]
async fn test_factory_from_config_file() {
    let dir = std::env::temp_dir().join("itemdeck-factory-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("itemdeck.toml");
    std::fs::write(
        &path,
        "[repository]\ntype = \"local\"\n\n[search]\nmatch = \"case-sensitive\"\n",
    )
    .unwrap();

    let repo = RepositoryFactory::from_config_file(&path).await.unwrap();
    assert!(repo.health_check().await.unwrap());

    let config = RepositoryConfig::from_file(&path).unwrap();
    assert_eq!(config.match_mode().unwrap(), MatchMode::CaseSensitive);
}

#[test]
fn test_config_file_missing_is_an_error() {
    let result = RepositoryConfig::from_file("/nonexistent/itemdeck.toml");
    assert!(result.is_err());
}

#[test]
fn test_resolve_match_mode_from_env() {
    with_scoped_env(
        &[
            ("ITEMDECK_CONFIG", None),
            ("SEARCH_MATCH", Some("case-sensitive")),
        ],
        || {
            assert_eq!(resolve_match_mode().unwrap(), MatchMode::CaseSensitive);
        },
    );
}

#[test]
fn test_resolve_match_mode_defaults_to_insensitive() {
    with_scoped_env(
        &[("ITEMDECK_CONFIG", None), ("SEARCH_MATCH", None)],
        || {
            assert_eq!(resolve_match_mode().unwrap(), MatchMode::CaseInsensitive);
        },
    );
}

#[test]
fn test_resolve_match_mode_rejects_unknown_values() {
    with_scoped_env(
        &[("ITEMDECK_CONFIG", None), ("SEARCH_MATCH", Some("fuzzy"))],
        || {
            assert!(resolve_match_mode().is_err());
        },
    );
}
