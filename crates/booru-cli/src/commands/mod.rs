//! CLI command definitions and dispatch.

pub mod admin;
pub mod migrate;
pub mod permission;
pub mod settings;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use booru_core::config::AppConfig;
use booru_core::error::AppError;
use booru_database::repositories::UserRepository;

use crate::output::OutputFormat;

/// booru catalog administration
#[derive(Debug, Parser)]
#[command(name = "booru-cli", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay (`config/{env}.toml`); defaults to
    /// `BOORU_CONFIG_ENV`, then `development`
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Admin role management
    Admin(admin::AdminArgs),
    /// Capability mask management
    Permission(permission::PermissionArgs),
    /// Application settings
    Settings(settings::SettingsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = match &self.env {
            Some(env) => AppConfig::load(env)?,
            None => AppConfig::load_from_env()?,
        };

        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, config).await,
            Commands::Admin(args) => admin::execute(args, config, self.format).await,
            Commands::Permission(args) => permission::execute(args, config, self.format).await,
            Commands::Settings(args) => settings::execute(args, config, self.format).await,
        }
    }
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<sqlx::PgPool, AppError> {
    let pool = booru_database::DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}

/// Helper: resolve a user given as UUID, name or email
pub async fn resolve_user(users: &UserRepository, ident: &str) -> Result<Uuid, AppError> {
    let found = match Uuid::parse_str(ident) {
        Ok(id) => users.find_by_id(id).await?,
        Err(_) => users.find_by_name_or_email(ident).await?,
    };
    found
        .map(|u| u.id)
        .ok_or_else(|| AppError::not_found(format!("User '{ident}' not found")))
}
