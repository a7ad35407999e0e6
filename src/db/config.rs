//! Storage configuration from environment variables and TOML files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::repository::{RepositoryError, RepositoryResult};

/// MongoDB connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// Connection string, e.g. `mongodb://localhost:27017`.
    pub uri: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_database() -> String {
    "sample_restaurants".to_string()
}

fn default_collection() -> String {
    "restaurants".to_string()
}

impl MongoConfig {
    /// Read settings from the environment.
    ///
    /// `MONGODB_URI` is required; `MONGODB_DB` and `MONGODB_COLLECTION` fall
    /// back to defaults. A missing URI is a configuration error so startup
    /// fails before the server binds.
    pub fn from_env() -> RepositoryResult<Self> {
        let uri = std::env::var("MONGODB_URI").map_err(|_| {
            RepositoryError::configuration(
                "MONGODB_URI must be set for the mongo repository backend",
            )
        })?;
        Ok(Self {
            uri,
            database: std::env::var("MONGODB_DB").unwrap_or_else(|_| default_database()),
            collection: std::env::var("MONGODB_COLLECTION")
                .unwrap_or_else(|_| default_collection()),
        })
    }
}

/// Repository configuration loaded from a TOML file.
///
/// ```toml
/// [repository]
/// type = "mongo"
///
/// [mongo]
/// uri = "mongodb://localhost:27017"
/// database = "sample_restaurants"
/// collection = "restaurants"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub mongo: Option<MongoConfig>,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

impl RepositoryConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&raw).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }
}
