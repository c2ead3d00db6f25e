// API Server Binary Entry Point
//
// Usage: cargo run --bin api_server

use dermamon_api::{create_router, AppState, Config};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // info for our crate, warn for others
                    "dermamon_api=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Dermamon API...");

    let config = Config::from_env()?;
    tracing::info!("Configuration:");
    tracing::info!("  PORT: {}", config.port);
    tracing::info!("  MODELS_DIR: {}", config.models_dir.display());
    tracing::info!("  STORE_BACKEND: {}", config.store_backend);

    let port = config.port;
    let state = AppState::new(config).await?;
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
