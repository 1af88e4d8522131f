//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging of the HTTP surface (with OpenAPI/Swagger UI). The
//! workspace's main `era-run` binary also loads `.env` before serving the same router.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{load_config_from_env, rest_addr_from_env, router, AppState};

/// Main entry point for the ERA REST API server
///
/// Starts the REST API server on the configured address (default: 0.0.0.0:3000).
///
/// # Environment Variables
/// - `ERA_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - plus the matcher settings read by [`load_config_from_env`]
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - configuration is invalid or a referenced file cannot be loaded,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = rest_addr_from_env();
    tracing::info!("-- Starting ERA REST API on {}", addr);

    let cfg = Arc::new(load_config_from_env()?);
    tracing::info!(
        rank_limit = cfg.rank_limit(),
        symptoms = cfg.taxonomy().len(),
        catalog = ?cfg.catalog_file(),
        "configuration loaded"
    );

    let state = AppState::new(cfg)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
