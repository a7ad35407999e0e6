//! Configuration and factory selection tests.

mod support;

use restaurant_api::db::{MongoConfig, RepositoryConfig, RepositoryError, RepositoryType};
use support::with_env;

#[test]
fn repository_type_prefers_explicit_env_var() {
    with_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("MONGODB_URI", Some("mongodb://localhost:27017")),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );
}

#[test]
fn repository_type_defaults_to_mongo_when_uri_present() {
    with_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("MONGODB_URI", Some("mongodb://localhost:27017")),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Mongo);
        },
    );
}

#[test]
fn repository_type_defaults_to_local_without_uri() {
    with_env(
        &[("REPOSITORY_TYPE", None), ("MONGODB_URI", None)],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );
}

#[test]
fn mongo_config_requires_uri() {
    with_env(&[("MONGODB_URI", None)], || {
        let err = MongoConfig::from_env().unwrap_err();
        assert!(matches!(err, RepositoryError::ConfigurationError(_)));
    });
}

#[test]
fn mongo_config_reads_env_with_defaults() {
    with_env(
        &[
            ("MONGODB_URI", Some("mongodb://localhost:27017")),
            ("MONGODB_DB", None),
            ("MONGODB_COLLECTION", Some("eateries")),
        ],
        || {
            let config = MongoConfig::from_env().unwrap();
            assert_eq!(config.uri, "mongodb://localhost:27017");
            assert_eq!(config.database, "sample_restaurants");
            assert_eq!(config.collection, "eateries");
        },
    );
}

#[test]
fn config_file_round_trips_through_disk() {
    let path = std::env::temp_dir().join(format!(
        "restaurant-api-config-{}.toml",
        std::process::id()
    ));
    std::fs::write(
        &path,
        r#"
        [repository]
        type = "mongo"

        [mongo]
        uri = "mongodb://example:27017"
        collection = "eateries"
        "#,
    )
    .unwrap();

    let config = RepositoryConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.repository.repo_type, "mongo");
    let mongo = config.mongo.unwrap();
    assert_eq!(mongo.uri, "mongodb://example:27017");
    assert_eq!(mongo.collection, "eateries");
    assert_eq!(mongo.database, "sample_restaurants");
}
