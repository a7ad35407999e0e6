//! Request/response bodies for the REST API.
//!
//! The list endpoint returns a bare array; single-record endpoints wrap the
//! record in a `{message, data}` envelope.

use serde::{Deserialize, Serialize};

use crate::db::Restaurant;

pub use super::validation::RawListQuery;

/// Envelope for single-record responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantEnvelope {
    pub message: String,
    pub data: Restaurant,
}

/// Plain confirmation message (delete).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}
