use anyhow::{Context, Result};
use clap::Parser;
use inventory::{
    ProductRepository, RequestContext,
    cli::{self, Cli, Command},
    run_migrations,
};
use shared::{
    config::{Config, ConnectionManager},
    utils::init_logger,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = Cli::parse();
    let config = Config::init().context("Failed to load configuration")?;

    let _log_guard = init_logger("inventory", config.dev_mode, config.enable_file_log);

    info!("🚀 Starting inventory command: {:?}", args.command);

    let pool = ConnectionManager::new_pool(
        &config.database.url,
        config.database.min_connections,
        config.database.max_connections,
        config.database.acquire_timeout,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.run_migrations || matches!(args.command, Command::Migrate) {
        run_migrations(&pool).await?;
    }

    let token = CancellationToken::new();
    shutdown_listener(token.clone());

    let mut ctx = RequestContext::with_cancellation(token);
    if let Some(secs) = args.timeout_secs {
        ctx = ctx.timeout(Duration::from_secs(secs));
    }

    let repo = ProductRepository::new(pool.clone());
    let outcome = cli::execute(args.command, &repo, &ctx).await;

    pool.close().await;

    match outcome {
        Ok(rendered) => {
            println!("{rendered}");
            Ok(())
        }
        Err(e) => {
            error!("❌ Command failed: {e}");
            Err(e)
        }
    }
}

fn shutdown_listener(token: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("🛑 Ctrl+C received, cancelling in-flight request...");
                token.cancel();
            }
            Err(e) => {
                error!("Failed to listen for shutdown signal: {}", e);
            }
        }
    });
}
