use anyhow::{Context, Result, anyhow};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub run_migrations: bool,
    pub dev_mode: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::init`] but reads keys through `lookup`, so callers can
    /// feed values from somewhere other than the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let min_connections = parse_or(&lookup, "DB_MIN_CONN", 1u32)?;
        let max_connections = parse_or(&lookup, "DB_MAX_CONN", 5u32)?;
        let acquire_timeout_secs = parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5u64)?;

        if max_connections == 0 {
            return Err(anyhow!("DB_MAX_CONN must be greater than zero"));
        }

        if min_connections > max_connections {
            return Err(anyhow!(
                "DB_MIN_CONN ({}) must not exceed DB_MAX_CONN ({})",
                min_connections,
                max_connections
            ));
        }

        let run_migrations = match lookup("RUN_MIGRATIONS").as_deref() {
            None | Some("false") => false,
            Some("true") => true,
            Some(other) => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let dev_mode = lookup("DEV_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let enable_file_log = lookup("ENABLE_FILE_LOG")
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(Self {
            database: DatabaseConfig {
                url,
                min_connections,
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            },
            run_migrations,
            dev_mode,
            enable_file_log,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
