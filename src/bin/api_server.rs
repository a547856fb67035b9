// API Server Binary Entry Point
//
// Purpose: Start the Axum API server over the crop scorer
// Usage: cargo run --features api --bin api_server

use crop_scorer_rust::{AppState, ServerConfig, create_router};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "crop_scorer_rust=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    let config = ServerConfig::from_env()?;

    tracing::info!("Configuration:");
    tracing::info!("  PORT: {}", config.port);
    tracing::info!("  CROP_CATALOG_PATH: {:?}", config.catalog_path);
    tracing::info!("  FEATURE_WEIGHTS_PATH: {:?}", config.weights_path);
    tracing::info!("  INPUT_POLICY: {:?}", config.input_policy);
    tracing::info!("  DEFAULT_TOP_K: {}", config.default_top_k);

    // Initialize application state (loads and validates reference data)
    let state = AppState::new(&config)?;
    tracing::info!("Application state initialized successfully");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
