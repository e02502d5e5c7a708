//! Admin role management commands.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use booru_api::AppState;
use booru_core::config::AppConfig;
use booru_core::error::AppError;
use booru_core::types::PageQuery;
use booru_database::repositories::UserRepository;
use booru_entity::user::UserDetail;

use crate::output::{self, OutputFormat};

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Grant the admin role to an existing user
    Grant {
        /// User ID, name or email
        user: String,
    },
    /// Revoke the admin role from a user
    Revoke {
        /// User ID, name or email
        user: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List administrators
    List {
        /// Maximum rows to show
        #[arg(long, default_value_t = 50)]
        limit: i64,
        /// Rows to skip
        #[arg(long, default_value_t = 0)]
        offset: i64,
        /// Name filter
        #[arg(short, long, default_value = "")]
        keywords: String,
    },
}

/// One administrator in a listing.
#[derive(Debug, Serialize, Tabled)]
struct AdminRow {
    id: Uuid,
    name: String,
    email: String,
    permission: i32,
    created_at: DateTime<Utc>,
}

impl From<UserDetail> for AdminRow {
    fn from(detail: UserDetail) -> Self {
        let permission = detail.permission_level().raw();
        Self {
            id: detail.user.id,
            name: detail.user.name,
            email: detail.user.email.unwrap_or_default(),
            permission,
            created_at: detail.user.created_at,
        }
    }
}

/// Execute admin commands
pub async fn execute(
    args: &AdminArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let pool = super::create_db_pool(&config).await?;
    let users = UserRepository::new(pool.clone());
    let state = AppState::new(config, pool);

    match &args.command {
        AdminCommand::Grant { user } => {
            let user_id = super::resolve_user(&users, user).await?;
            let admin = state.admin_service.assign(user_id).await?;
            output::print_success(&format!("'{user}' is now an admin (admin id: {})", admin.id));
        }
        AdminCommand::Revoke { user, yes } => {
            let user_id = super::resolve_user(&users, user).await?;

            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Revoke the admin role from '{user}'?"))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;
                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            state.admin_service.remove(user_id).await?;
            output::print_success(&format!("Admin role revoked from '{user}'"));
        }
        AdminCommand::List {
            limit,
            offset,
            keywords,
        } => {
            let query = PageQuery {
                keywords: keywords.clone(),
                ..PageQuery::new(*limit, *offset)
            };
            let page = state.admin_service.list(&query).await?;
            let rows: Vec<AdminRow> = page.list.into_iter().map(AdminRow::from).collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!(
                    "page {} ({} per page), {} total",
                    page.meta.page, page.meta.per_page, page.meta.total
                );
            }
        }
    }

    Ok(())
}
