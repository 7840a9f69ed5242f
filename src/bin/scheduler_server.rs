//! Runs the scheduler HTTP API.
//!
//! Usage:
//!
//! ```text
//! scheduler_server [--port 7540] [--database scheduler.db] [--list-limit 50]
//! ```
//!
//! Every flag may also be given through its environment variable
//! (`TODO_PORT`, `TODO_DBFILE`, `TODO_LIST_LIMIT`, `TODO_POOL_SIZE`,
//! `TODO_LOG`). The database file and its schema are created on first start.

use clap::Parser;
use mockable::DefaultClock;
use scheduler::config::ServerConfig;
use scheduler::task::{
    adapters::{
        http,
        sqlite::{SqliteTaskRepository, build_pool},
    },
    services::TaskLifecycleService,
};
use scheduler::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = ServerConfig::parse();
    telemetry::init(&config.log_filter)?;

    let pool = build_pool(&config.database, config.pool_size)?;
    let repository = Arc::new(SqliteTaskRepository::new(pool));
    repository.initialize().await?;

    let service = TaskLifecycleService::new(repository, Arc::new(DefaultClock))
        .with_list_limit(config.list_limit);
    let app = http::router(Arc::new(service));

    let address = config.bind_address();
    let listener = TcpListener::bind(address).await?;
    info!(%address, database = %config.database, "scheduler listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("scheduler stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
