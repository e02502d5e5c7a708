//! booru server: catalog backend for a tag-based image board.
//!
//! Loads configuration, initialises logging, connects to PostgreSQL, runs
//! migrations and serves the HTTP API.

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use booru_core::config::{AppConfig, LoggingConfig};
use booru_database::DatabasePool;
use booru_database::connection::mask_password;
use booru_database::migration::run_migrations;

#[tokio::main]
async fn main() {
    let config = match AppConfig::load_from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging, config.app.development);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e:#}");
        std::process::exit(1);
    }
}

/// Log output selected from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogStyle {
    Json,
    Pretty,
    /// Pretty output with source locations.
    Development,
}

impl LogStyle {
    fn select(config: &LoggingConfig, development: bool) -> Self {
        if development {
            return Self::Development;
        }
        match config.format.as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Initialize tracing/logging. `RUST_LOG` overrides the configured level.
fn init_logging(config: &LoggingConfig, development: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match LogStyle::select(config, development) {
        LogStyle::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogStyle::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        LogStyle::Development => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        database = %mask_password(&config.database.url),
        enforce_email = config.app.enforce_email,
        "Starting booru server"
    );

    let pool = DatabasePool::connect(&config.database)
        .await
        .context("database connection failed")?
        .into_pool();

    run_migrations(&pool).await.context("migrations failed")?;

    booru_api::run_server(config, pool)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(format: &str) -> LoggingConfig {
        LoggingConfig {
            format: format.to_string(),
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn test_log_style_follows_format() {
        assert_eq!(LogStyle::select(&logging("json"), false), LogStyle::Json);
        assert_eq!(LogStyle::select(&logging("pretty"), false), LogStyle::Pretty);
    }

    #[test]
    fn test_development_overrides_format() {
        assert_eq!(LogStyle::select(&logging("json"), true), LogStyle::Development);
    }
}
