//! Repository trait and error types for restaurant storage.
//!
//! The trait is the seam between HTTP handlers and the storage backends;
//! implementations must be `Send + Sync` so a single instance can be shared
//! across request tasks behind an `Arc`.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::models::{Restaurant, RestaurantId};

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations.
///
/// The variants are an explicit error-kind discriminant: callers match on
/// them instead of inspecting an underlying driver error type. In particular
/// `InvalidId` is the "client sent a structurally bad identifier" case that
/// the HTTP layer downgrades to a 400 rather than a 500.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    /// Failure establishing or using the storage connection.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A query against the store failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// Requested record was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A client-supplied identifier is not a structurally valid ObjectId.
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Configuration or initialization error.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Internal/unexpected errors.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl RepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::ConnectionError(message.into())
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::QueryError(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId(id.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

/// Validated parameters for the paginated, filterable list query.
///
/// `page` and `per_page` are 1-based and already validated by the HTTP layer;
/// the window is skip `(page - 1) * per_page`, take `per_page`, applied after
/// the optional borough equality filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u64,
    pub per_page: u64,
    pub borough: Option<String>,
}

impl ListQuery {
    /// Number of records to skip before the requested window.
    ///
    /// Saturates instead of overflowing: a window starting past `u64::MAX`
    /// cannot match anything, so the degenerate case is an empty page, not
    /// a panic.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

/// Repository trait for restaurant CRUD operations.
///
/// Each method is one logical unit of work against the store. "Not found" is
/// signalled in-band (`None` / `false` / empty vec); errors are reserved for
/// genuine storage failures.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Insert a new record built from raw client fields. The backend assigns
    /// the identifier and returns the stored record including it.
    async fn insert_restaurant(
        &self,
        fields: Map<String, Value>,
    ) -> RepositoryResult<Restaurant>;

    /// Fetch one page of records in natural (insertion) order, optionally
    /// filtered by exact borough match before windowing.
    async fn list_restaurants(&self, query: &ListQuery) -> RepositoryResult<Vec<Restaurant>>;

    /// Fetch a single record by identifier.
    async fn get_restaurant(&self, id: &RestaurantId) -> RepositoryResult<Option<Restaurant>>;

    /// Partial-merge update: only the supplied fields change. Returns the
    /// updated record, or `None` if no record has this identifier.
    async fn update_restaurant(
        &self,
        id: &RestaurantId,
        changes: Map<String, Value>,
    ) -> RepositoryResult<Option<Restaurant>>;

    /// Delete by identifier. Returns whether a record was actually removed;
    /// deleting an absent identifier is not an error.
    async fn delete_restaurant(&self, id: &RestaurantId) -> RepositoryResult<bool>;

    /// Probe whether the storage backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based_window_start() {
        let q = ListQuery {
            page: 1,
            per_page: 10,
            borough: None,
        };
        assert_eq!(q.offset(), 0);

        let q = ListQuery {
            page: 3,
            per_page: 7,
            borough: None,
        };
        assert_eq!(q.offset(), 14);
    }

    #[test]
    fn offset_saturates_instead_of_overflowing() {
        let q = ListQuery {
            page: u64::MAX,
            per_page: u64::MAX,
            borough: None,
        };
        assert_eq!(q.offset(), u64::MAX);

        let q = ListQuery {
            page: i64::MAX as u64,
            per_page: i64::MAX as u64,
            borough: None,
        };
        assert_eq!(q.offset(), u64::MAX);
    }

    #[test]
    fn error_display_carries_message() {
        let e = RepositoryError::invalid_id("nope");
        assert_eq!(e.to_string(), "Invalid identifier: nope");
        let e = RepositoryError::query("boom");
        assert!(e.to_string().contains("boom"));
    }
}
