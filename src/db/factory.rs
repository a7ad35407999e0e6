//! Repository factory for dependency injection.
//!
//! The factory constructs one repository instance at startup; the server
//! passes it to handlers through `AppState` rather than a process-global.

use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "mongo-repo")]
use super::config::MongoConfig;
use super::config::RepositoryConfig;
#[cfg(feature = "local-repo")]
use super::repositories::LocalRepository;
#[cfg(feature = "mongo-repo")]
use super::repositories::MongoRepository;
use super::repository::{RepositoryError, RepositoryResult, RestaurantRepository};

/// Repository backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// MongoDB backend
    Mongo,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from the environment.
    ///
    /// Reads `REPOSITORY_TYPE`; absent that, defaults to Mongo when a
    /// connection string is present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("MONGODB_URI").is_ok() {
            Self::Mongo
        } else {
            Self::Local
        }
    }
}

/// Factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository for the given type, pulling MongoDB settings from
    /// the environment when needed.
    pub async fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn RestaurantRepository>> {
        match repo_type {
            RepositoryType::Local => Self::create_local(),
            RepositoryType::Mongo => Self::create_mongo_from_env().await,
        }
    }

    /// Create a repository from a TOML configuration file.
    pub async fn from_config_file(path: &str) -> RepositoryResult<Arc<dyn RestaurantRepository>> {
        let config = RepositoryConfig::from_file(path)?;
        let repo_type: RepositoryType = config
            .repository
            .repo_type
            .parse()
            .map_err(RepositoryError::configuration)?;

        match repo_type {
            RepositoryType::Local => Self::create_local(),
            #[cfg(feature = "mongo-repo")]
            RepositoryType::Mongo => {
                let mongo = config.mongo.ok_or_else(|| {
                    RepositoryError::configuration(
                        "Config file selects the mongo backend but has no [mongo] section",
                    )
                })?;
                Self::create_mongo(&mongo).await
            }
            #[cfg(not(feature = "mongo-repo"))]
            RepositoryType::Mongo => Err(RepositoryError::configuration(
                "Mongo backend requested but the mongo-repo feature is not enabled",
            )),
        }
    }

    /// Create an in-memory repository.
    #[cfg(feature = "local-repo")]
    pub fn create_local() -> RepositoryResult<Arc<dyn RestaurantRepository>> {
        Ok(Arc::new(LocalRepository::new()))
    }

    #[cfg(not(feature = "local-repo"))]
    pub fn create_local() -> RepositoryResult<Arc<dyn RestaurantRepository>> {
        Err(RepositoryError::configuration(
            "Local backend requested but the local-repo feature is not enabled",
        ))
    }

    /// Create a MongoDB repository and verify the connection.
    #[cfg(feature = "mongo-repo")]
    pub async fn create_mongo(
        config: &MongoConfig,
    ) -> RepositoryResult<Arc<dyn RestaurantRepository>> {
        let repo = MongoRepository::connect(config).await?;
        Ok(Arc::new(repo))
    }

    #[cfg(feature = "mongo-repo")]
    async fn create_mongo_from_env() -> RepositoryResult<Arc<dyn RestaurantRepository>> {
        let config = MongoConfig::from_env()?;
        Self::create_mongo(&config).await
    }

    #[cfg(not(feature = "mongo-repo"))]
    async fn create_mongo_from_env() -> RepositoryResult<Arc<dyn RestaurantRepository>> {
        Err(RepositoryError::configuration(
            "Mongo backend requested but the mongo-repo feature is not enabled",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_type_parses_known_names() {
        assert_eq!("mongo".parse::<RepositoryType>(), Ok(RepositoryType::Mongo));
        assert_eq!(
            "MongoDB".parse::<RepositoryType>(),
            Ok(RepositoryType::Mongo)
        );
        assert_eq!("local".parse::<RepositoryType>(), Ok(RepositoryType::Local));
        assert!("redis".parse::<RepositoryType>().is_err());
    }

    #[cfg(feature = "local-repo")]
    #[tokio::test]
    async fn create_local_yields_working_repository() {
        let repo = RepositoryFactory::create(RepositoryType::Local)
            .await
            .unwrap();
        assert!(repo.health_check().await.unwrap());
    }
}
