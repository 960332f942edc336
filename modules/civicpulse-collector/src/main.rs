use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

use civicpulse_collector::{
    scheduler, Collector, CollectorConfig, CommentStore,
};
use graph_client::GraphClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("CivicPulse collector starting...");

    // Load config
    let config = CollectorConfig::from_env()?;

    // Acquire the storage connection once for the process lifetime.
    // Failure here is fatal: there is no point scheduling cycles that
    // can never persist.
    let options = PgConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .database(&config.db_name)
        .username(&config.db_user)
        .password(&config.db_password);

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("Failed to connect to Postgres")?;

    let store = CommentStore::new(pool.clone());
    store.migrate().await.context("Failed to run migrations")?;

    let client = GraphClient::new(config.graph_base_url.clone(), config.access_token.clone());
    let collector = Collector::new(client, store, config.post_ids.clone());

    scheduler::run(&collector, Duration::from_millis(config.poll_interval_ms)).await;

    // Graceful drain: let in-flight writes finish, then release the pool.
    pool.close().await;
    info!("Storage connection closed, exiting");

    Ok(())
}
