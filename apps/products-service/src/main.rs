//! # Products Service Binary
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Startup Sequence                                 │
//! │                                                                         │
//! │  tracing ──► ServiceConfig::load ──► Database::new (+ migrations)      │
//! │                                            │                            │
//! │                                            ▼                            │
//! │  CommandListener::run ◄── NATS connect ◄── health check                │
//! │         │                                                               │
//! │         ▼  Ctrl+C / SIGTERM                                            │
//! │  drain in-flight commands ──► close pool                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::{bail, Context};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use catalog_db::migrations::migration_status;
use catalog_db::{Database, DbConfig};
use products_service::{transport, CommandDispatcher, CommandListener, ProductsService, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting products service...");

    let config = ServiceConfig::load().context("loading configuration")?;
    info!(
        port = config.port,
        database = %config.database_path.display(),
        subject = %config.subscription_subject(),
        "Configuration loaded"
    );

    let db_config =
        DbConfig::new(config.database_path.clone()).max_connections(config.db_max_connections);
    let db = Database::new(db_config)
        .await
        .context("opening product database")?;

    if !db.health_check().await {
        bail!("database health check failed");
    }
    let (total, applied) = migration_status(db.pool()).await?;
    info!(total, applied, "Database ready");

    let client = transport::connect(&config).await?;

    let dispatcher = CommandDispatcher::new(ProductsService::new(db.products()));
    let listener = CommandListener::new(client, dispatcher, &config);

    info!(port = config.port, "Products service running");
    listener.run(shutdown_signal()).await?;

    db.close().await;
    info!("Shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
