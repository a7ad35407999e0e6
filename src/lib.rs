//! # Restaurant API Backend
//!
//! A CRUD HTTP service over a single MongoDB collection of restaurant
//! records, plus a server-rendered HTML form for the paginated list query.
//!
//! ## Architecture
//!
//! - [`db`]: Restaurant document model, repository trait, and the storage
//!   backends (MongoDB and an in-memory backend for tests/development)
//! - [`http`]: Axum-based HTTP server, request validation, and the two
//!   HTML form views
//!
//! The repository backend is selected at build time via cargo features
//! (`mongo-repo` / `local-repo`) and constructed once at startup; handlers
//! receive it through [`http::AppState`] rather than a process-global.

pub mod db;

#[cfg(feature = "http-server")]
pub mod http;
