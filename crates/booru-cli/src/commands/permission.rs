//! Capability mask commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use booru_api::AppState;
use booru_core::config::AppConfig;
use booru_core::error::AppError;
use booru_database::repositories::UserRepository;
use booru_entity::permission::PermissionLevel;

use crate::output::{self, OutputFormat};

/// Arguments for permission commands
#[derive(Debug, Args)]
pub struct PermissionArgs {
    /// Permission subcommand
    #[command(subcommand)]
    pub command: PermissionCommand,
}

/// Permission subcommands
#[derive(Debug, Subcommand)]
pub enum PermissionCommand {
    /// Show a user's capability mask
    Get {
        /// User ID, name or email
        user: String,
    },
    /// Replace a user's capability mask
    Set {
        /// User ID, name or email
        user: String,
        /// Mask as a number (0-15) or flag names, e.g. `read,write`
        level: String,
    },
}

#[derive(Debug, Serialize)]
struct PermissionView {
    user_id: Uuid,
    permission: i32,
    flags: String,
}

impl PermissionView {
    fn new(user_id: Uuid, level: PermissionLevel) -> Self {
        let flags = level.names().join(",");
        Self {
            user_id,
            permission: level.raw(),
            flags: if flags.is_empty() { "-".to_string() } else { flags },
        }
    }
}

/// Parses `7`, `read,write` or `all` into a raw mask.
fn parse_level(input: &str) -> Result<i32, AppError> {
    if let Ok(raw) = input.trim().parse::<i32>() {
        return Ok(raw);
    }

    input
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .try_fold(PermissionLevel::empty(), |acc, part| {
            PermissionLevel::parse(part)
                .map(|flag| acc | flag)
                .ok_or_else(|| AppError::validation(format!("Unknown permission '{}'", part.trim())))
        })
        .map(PermissionLevel::raw)
}

/// Execute permission commands
pub async fn execute(
    args: &PermissionArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let pool = super::create_db_pool(&config).await?;
    let users = UserRepository::new(pool.clone());
    let state = AppState::new(config, pool);

    match &args.command {
        PermissionCommand::Get { user } => {
            let user_id = super::resolve_user(&users, user).await?;
            let permission = state.permission_service.get(user_id).await?;
            output::print_item(&PermissionView::new(user_id, permission.permission), format);
        }
        PermissionCommand::Set { user, level } => {
            let user_id = super::resolve_user(&users, user).await?;
            let permission = state
                .permission_service
                .set(user_id, parse_level(level)?)
                .await?;
            output::print_success(&format!("Permission updated for '{user}'"));
            output::print_item(&PermissionView::new(user_id, permission.permission), format);
        }
    }

    Ok(())
}
