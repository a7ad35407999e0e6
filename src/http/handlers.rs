//! HTTP handlers for the REST API and the HTML form entry point.
//!
//! Each handler validates its inputs, makes exactly one repository call, and
//! maps the outcome onto the response contract. Malformed path identifiers
//! are rejected before any storage access.

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};
use tracing::{error, info};

use super::dto::{HealthResponse, MessageResponse, RawListQuery, RestaurantEnvelope};
use super::error::AppError;
use super::state::AppState;
use super::views;
use crate::db::{Restaurant, RestaurantId};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn parse_id(raw: &str) -> Result<RestaurantId, AppError> {
    raw.parse::<RestaurantId>().map_err(|_| AppError::InvalidId)
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let database = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        database,
    }))
}

// =============================================================================
// Restaurant CRUD
// =============================================================================

/// POST /api/restaurants
///
/// Create a restaurant from arbitrary body fields; the storage backend
/// assigns the identifier and the created record is echoed back.
pub async fn create_restaurant(
    State(state): State<AppState>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<Restaurant>), AppError> {
    let created = state.repository.insert_restaurant(fields).await?;
    info!(
        id = %created.id.map(|id| id.to_hex()).unwrap_or_default(),
        "Created restaurant"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/restaurants?page=N&perPage=S&borough=B
///
/// Paginated, optionally borough-filtered listing. An empty page is a
/// success here; only the HTML form route treats it as not-found.
pub async fn list_restaurants(
    State(state): State<AppState>,
    Query(raw): Query<RawListQuery>,
) -> HandlerResult<Vec<Restaurant>> {
    let query = raw.validate().map_err(AppError::Validation)?;
    let restaurants = state.repository.list_restaurants(&query).await?;
    Ok(Json(restaurants))
}

/// GET /api/restaurants/{id}
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<RestaurantEnvelope> {
    let id = parse_id(&id)?;
    let restaurant = state
        .repository
        .get_restaurant(&id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(RestaurantEnvelope {
        message: "Successfully retrieved restaurant details for the specific _id.".to_string(),
        data: restaurant,
    }))
}

/// PUT /api/restaurants/{id}
///
/// Partial merge: only the supplied fields change.
pub async fn update_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<Map<String, Value>>,
) -> HandlerResult<RestaurantEnvelope> {
    let id = parse_id(&id)?;
    let updated = state
        .repository
        .update_restaurant(&id, changes)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(id = %id, "Updated restaurant");

    Ok(Json(RestaurantEnvelope {
        message: "Restaurant successfully updated.".to_string(),
        data: updated,
    }))
}

/// DELETE /api/restaurants/{id}
///
/// Deleting an absent record is a 404, indistinguishable from one that
/// never existed.
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<MessageResponse> {
    let id = parse_id(&id)?;
    let deleted = state.repository.delete_restaurant(&id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }
    info!(id = %id, "Deleted restaurant");

    Ok(Json(MessageResponse {
        message: "Restaurant successfully deleted.".to_string(),
    }))
}

// =============================================================================
// HTML Form
// =============================================================================

/// GET /api/restaurantForm
pub async fn show_restaurant_form() -> Html<String> {
    Html(views::render_form())
}

/// POST /api/restaurantForm
///
/// Form-encoded variant of the list query, rendered as HTML. Unlike the JSON
/// API, an empty result here renders a 404 "no restaurants found" page.
pub async fn submit_restaurant_form(
    State(state): State<AppState>,
    Form(raw): Form<RawListQuery>,
) -> Response {
    let query = match raw.validate() {
        Ok(query) => query,
        Err(errors) => {
            let details: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return (
                StatusCode::BAD_REQUEST,
                Html(views::render_error("Validation error", &details)),
            )
                .into_response();
        }
    };

    match state.repository.list_restaurants(&query).await {
        Ok(restaurants) if restaurants.is_empty() => (
            StatusCode::NOT_FOUND,
            Html(views::render_error(
                "No restaurants found for the specified borough",
                &[],
            )),
        )
            .into_response(),
        Ok(restaurants) => Html(views::render_results(
            query.page,
            query.per_page,
            query.borough.as_deref(),
            &restaurants,
        ))
        .into_response(),
        Err(e) => {
            error!("Error getting all restaurants: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::render_error("Database error", &[e.to_string()])),
            )
                .into_response()
        }
    }
}
