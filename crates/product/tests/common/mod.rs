#![allow(dead_code)]

use inventory::{Product, ProductRepository, run_migrations};
use rust_decimal::Decimal;
use shared::config::{ConnectionManager, ConnectionPool};
use std::time::Duration;
use tempfile::TempDir;

pub struct TestDb {
    pub pool: ConnectionPool,
    pub repo: ProductRepository,
    _dir: TempDir,
}

/// A migrated SQLite database in a fresh temp directory.
pub async fn setup(max_connections: u32) -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("inventory.db").display()
    );

    let pool = ConnectionManager::new_pool(&url, 0, max_connections, Duration::from_secs(2))
        .await
        .expect("Failed to create pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let repo = ProductRepository::new(pool.clone());

    TestDb {
        pool,
        repo,
        _dir: dir,
    }
}

pub fn widget() -> Product {
    Product::new("P1", "Widget", 10, Decimal::new(250, 2))
}

pub fn product(id: &str) -> Product {
    Product::new(id, format!("Item {id}"), 1, Decimal::new(100, 2))
}

/// Waits for dropped connections to find their way back to the idle set.
pub async fn wait_for_idle(pool: &ConnectionPool, expected: usize) -> bool {
    for _ in 0..100 {
        if pool.num_idle() == expected {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
