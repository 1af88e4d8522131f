use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, load_config_from_env, rest_addr_from_env, router};

/// Main entry point for the ERA application
///
/// Loads `.env` if present, resolves configuration once, then serves the REST API.
///
/// # Environment Variables
/// - `ERA_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `ERA_RANK_LIMIT`: default number of ranked hospitals (default: 3)
/// - `ERA_TAXONOMY_FILE`: symptom taxonomy file (default: built-in table)
/// - `ERA_CATALOG_FILE`: fixed hospital catalog (default: generate hospitals near the caller)
/// - `ERA_DEFAULT_LATITUDE` / `ERA_DEFAULT_LONGITUDE`: location used when a request has none
/// - `ERA_AMBULANCE_SPEED_KMH`: speed for arrival estimates (default: 40)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("era=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = rest_addr_from_env().parse()?;
    let cfg = Arc::new(load_config_from_env()?);

    tracing::info!("++ Starting ERA REST on {}", rest_addr);
    tracing::info!(
        "++ Ranking {} hospitals per request from {}",
        cfg.rank_limit(),
        match cfg.catalog_file() {
            Some(path) => path.display().to_string(),
            None => "generated nearby hospitals".into(),
        }
    );

    let state = AppState::new(cfg)?;
    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
