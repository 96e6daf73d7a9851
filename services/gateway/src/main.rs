use std::sync::Arc;

use anyhow::Result;
use common::{shutdown::shutdown_signal, telemetry::init_tracing};
use tracing::info;

use gateway::{
    AppState,
    clients::{HttpIdentityClient, HttpOrderClient},
    config::GatewayConfig,
    routes,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("gateway")?;

    info!("Starting gateway");

    let config = GatewayConfig::from_env()?;

    let identity = HttpIdentityClient::new(&config.identity_url, config.upstream_timeout)?;
    let orders = HttpOrderClient::new(&config.order_url, config.upstream_timeout)?;

    info!(
        identity = %config.identity_url,
        orders = %config.order_url,
        timeout = ?config.upstream_timeout,
        "Gateway initialized successfully"
    );

    let app_state = AppState {
        identity: Arc::new(identity),
        orders: Arc::new(orders),
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Gateway listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
