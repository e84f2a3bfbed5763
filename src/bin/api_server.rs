// API Server Binary Entry Point
//
// Purpose: Start the Axum API server over the soil assessment engine
// Usage: cargo run --features api --bin api_server

use anyhow::Context;
use soil_advisor::{create_router, AppState, ThresholdTable};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // Default log level: info for our crate, warn for others
                "soil_advisor=info,tower_http=debug,axum=debug,warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    let thresholds_path = std::env::var("SOIL_THRESHOLDS").ok();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    tracing::info!("Configuration:");
    tracing::info!(
        "  SOIL_THRESHOLDS: {}",
        thresholds_path.as_deref().unwrap_or("(built-in defaults)")
    );
    tracing::info!("  PORT: {}", port);

    // Load the threshold table. A configured file that is missing or
    // malformed is fatal: the process must not serve with a broken table.
    let thresholds = match &thresholds_path {
        Some(path) => ThresholdTable::from_path(path)
            .with_context(|| format!("loading threshold table from {path}"))?,
        None => ThresholdTable::default(),
    };

    let state = AppState::new(thresholds);
    tracing::info!("Threshold table loaded, assessor ready");

    // Create router with all endpoints and middleware
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
