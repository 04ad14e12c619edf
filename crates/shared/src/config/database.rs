use anyhow::Context;
use sqlx::{
    AnyPool,
    any::{AnyPoolOptions, install_default_drivers},
};
use std::time::Duration;
use tracing::info;

pub type ConnectionPool = AnyPool;

pub struct ConnectionManager;

impl ConnectionManager {
    /// Builds the shared pool. The URL scheme picks the driver
    /// (`postgres://` in deployments, `sqlite:` for local runs and tests).
    pub async fn new_pool(
        connection_string: &str,
        min_connections: u32,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> anyhow::Result<ConnectionPool> {
        install_default_drivers();

        let pool = AnyPoolOptions::new()
            .min_connections(min_connections)
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(connection_string)
            .await
            .context("Failed to create database connection pool")?;

        info!(
            "🗄️ Database pool ready (min: {}, max: {})",
            min_connections, max_connections
        );

        Ok(pool)
    }
}
