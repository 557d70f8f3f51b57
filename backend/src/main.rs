use axum::serve;
use std::sync::Arc;
use tokio::net::TcpListener;

use backend::config::Config;
use backend::handlers;
use backend::storage::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    backend::init_tracing();

    let config = Config::from_env()?;
    let store = Store::open_or_create(&config.data_dir)
        .map_err(|e| anyhow::anyhow!("Failed to open data directory: {}", e))?;
    let counts = store.counts()?;
    tracing::info!(
        data_dir = ?config.data_dir,
        houses = counts.houses,
        announcements = counts.announcements,
        "store opened"
    );
    if counts.houses == 0 {
        tracing::warn!("no houses found; run `houses-admin seed` to load mock data");
    }

    let app = handlers::router(Arc::new(store), &config.allowed_origins);

    let listener = TcpListener::bind(config.bind_addr).await
        .map_err(|e| anyhow::anyhow!("Failed to bind to address {}: {}", config.bind_addr, e))?;
    tracing::info!(addr = %config.bind_addr, "listening");

    serve(listener, app).await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
