use std::sync::Arc;

use anyhow::Result;
use common::{database, shutdown::shutdown_signal, telemetry::init_tracing};
use tracing::info;

use identity::{
    AppState,
    config::IdentityConfig,
    jwt::TokenService,
    password::PasswordHasher,
    repositories::PgCredentialStore,
    routes,
    service::IdentityService,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("identity")?;

    info!("Starting identity service");

    let config = IdentityConfig::from_env()?;

    // Initialize database connection pool
    let pool = database::connect_with_retry(&config.database).await?;

    let store = PgCredentialStore::new(pool);
    store.init_schema().await?;

    let hasher = PasswordHasher::new(&config.password)?;
    let tokens = TokenService::new(&config.jwt);

    let app_state = AppState {
        identity: IdentityService::new(Arc::new(store), hasher, tokens),
    };

    info!("Identity service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Identity service listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
