//! Restaurant API server binary.
//!
//! Initializes logging, constructs the repository backend, and serves the
//! HTTP API. A storage connection failure aborts startup with a non-zero
//! exit before any request is accepted.
//!
//! # Usage
//!
//! ```bash
//! # Run with the in-memory repository (default features)
//! cargo run --bin restaurant-server
//!
//! # Run against MongoDB
//! MONGODB_URI=mongodb://localhost:27017 \
//!   cargo run --bin restaurant-server --features "mongo-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8000)
//! - `REPOSITORY_TYPE`: `mongo` or `local` (default: mongo iff MONGODB_URI is set)
//! - `REPOSITORY_CONFIG`: Optional path to a TOML config file overriding the above
//! - `MONGODB_URI`, `MONGODB_DB`, `MONGODB_COLLECTION`: MongoDB settings
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use restaurant_api::db::{RepositoryFactory, RepositoryType};
use restaurant_api::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting restaurant API server");

    // Construct the repository once and inject it into the handlers. A
    // connection failure here is fatal: the process exits non-zero without
    // ever binding the listener.
    let repository = match env::var("REPOSITORY_CONFIG") {
        Ok(path) => RepositoryFactory::from_config_file(&path)
            .await
            .map_err(|e| anyhow::anyhow!(e))?,
        Err(_) => RepositoryFactory::create(RepositoryType::from_env())
            .await
            .map_err(|e| anyhow::anyhow!(e))?,
    };
    info!("Repository initialized successfully");

    let state = AppState::new(repository);
    let app = create_router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8000);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server running on port: {}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
