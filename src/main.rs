use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobly_api::app;
use jobly_api::config;
use jobly_api::database::{schema, DatabaseManager, PgClient, StorageClient};
use jobly_api::handlers::AppState;
use jobly_api::is_production;

#[derive(Parser)]
#[command(name = "jobly-api")]
#[command(about = "Jobly API - companies and jobs")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides JOBLY_API_PORT / PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Do not create missing tables at startup
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jobly_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let config = config::config();
    tracing::info!("Starting Jobly API in {:?} mode", config.environment);

    if is_production!() && config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; every write request will be rejected");
    }

    let database = DatabaseManager::connect_lazy(&config.database).context("invalid database configuration")?;
    let storage: Arc<dyn StorageClient> = Arc::new(PgClient::new(database.pool().clone(), &config.database));

    if args.skip_migrations {
        tracing::info!("Skipping schema bootstrap");
    } else if let Err(e) = schema::ensure_schema(storage.as_ref()).await {
        // Keep serving; /health reports the database as degraded
        tracing::error!("Schema bootstrap failed: {}", e);
    }

    let app = app::router(AppState::new(storage), config);

    let port = args.port.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Jobly API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    database.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
