//! Repository implementations for different storage backends.

#[cfg(feature = "local-repo")]
pub mod local;

#[cfg(feature = "mongo-repo")]
pub mod mongo;

#[cfg(feature = "local-repo")]
pub use local::LocalRepository;

#[cfg(feature = "mongo-repo")]
pub use mongo::MongoRepository;
