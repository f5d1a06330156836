use anyhow::Result;
use common::database::{DatabaseConfig, close_pool, health_check, init_pool};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use watchlist::{routes, schema, settings::Settings, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;

    // Initialize logging, RUST_LOG takes precedence over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting watchlist service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if !health_check(&pool).await? {
        anyhow::bail!("Failed to connect to database");
    }

    if settings.database.ensure_schema {
        schema::ensure_schema(&pool).await?;
    }

    let app = routes::create_router(AppState::postgres(pool.clone()));

    let address = settings.server.address();
    let listener = TcpListener::bind(&address).await?;
    info!("Watchlist service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    info!("Watchlist service stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
