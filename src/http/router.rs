//! Router configuration for the HTTP API.
//!
//! This module sets up all routes and middleware (CORS, compression,
//! tracing) and creates the axum router ready for serving.

use axum::{
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/api/restaurants",
            get(handlers::list_restaurants).post(handlers::create_restaurant),
        )
        .route(
            "/api/restaurants/{id}",
            get(handlers::get_restaurant)
                .put(handlers::update_restaurant)
                .delete(handlers::delete_restaurant),
        )
        .route(
            "/api/restaurantForm",
            get(handlers::show_restaurant_form).post(handlers::submit_restaurant_form),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{LocalRepository, RestaurantRepository};
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn RestaurantRepository>;
        let state = AppState::new(repo);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
