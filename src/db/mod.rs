//! Database module for restaurant storage.
//!
//! Follows the repository pattern: the [`repository::RestaurantRepository`]
//! trait is the abstract interface, with a MongoDB implementation for
//! production and an in-memory implementation for unit testing and local
//! development. Backends are selected via cargo features and constructed
//! through [`factory::RepositoryFactory`] at startup.

#[cfg(not(any(feature = "mongo-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod config;
pub mod factory;
pub mod models;
pub mod repositories;
pub mod repository;

pub use config::{MongoConfig, RepositoryConfig};
pub use factory::{RepositoryFactory, RepositoryType};
pub use models::{Restaurant, RestaurantId};
#[cfg(feature = "local-repo")]
pub use repositories::LocalRepository;
#[cfg(feature = "mongo-repo")]
pub use repositories::MongoRepository;
pub use repository::{ListQuery, RepositoryError, RepositoryResult, RestaurantRepository};
