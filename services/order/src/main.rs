use std::sync::Arc;

use anyhow::Result;
use common::{database, shutdown::shutdown_signal, telemetry::init_tracing};
use tracing::info;

use order::{AppState, config::OrderConfig, repositories::PgOrderStore, routes};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("order")?;

    info!("Starting order service");

    let config = OrderConfig::from_env()?;

    // Initialize database connection pool
    let pool = database::connect_with_retry(&config.database).await?;

    let store = PgOrderStore::new(pool);
    store.init_schema().await?;

    let app_state = AppState {
        store: Arc::new(store),
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Order service listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
