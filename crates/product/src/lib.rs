pub mod abstract_trait;
pub mod cli;
pub mod context;
pub mod domain;
pub mod model;
pub mod repository;

use anyhow::Context;
use shared::config::ConnectionPool;
use sqlx::migrate::Migrator;
use tracing::info;

pub use self::context::RequestContext;
pub use self::domain::product::Product;
pub use self::repository::{ProductPager, ProductRepository};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn run_migrations(pool: &ConnectionPool) -> anyhow::Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    info!("✅ Database migrations applied");
    Ok(())
}
