//! Application settings commands.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use booru_api::AppState;
use booru_core::config::AppConfig;
use booru_core::error::AppError;
use booru_entity::settings::AppSetting;

use crate::output::{self, OutputFormat};

/// Arguments for settings commands
#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Settings subcommand
    #[command(subcommand)]
    pub command: SettingsCommand,
}

/// Settings subcommands
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show every stored setting
    Show,
}

#[derive(Debug, Serialize, Tabled)]
struct SettingRow {
    key: String,
    value: String,
    updated_at: DateTime<Utc>,
}

impl From<AppSetting> for SettingRow {
    fn from(setting: AppSetting) -> Self {
        let value = setting
            .value_bool
            .map(|v| v.to_string())
            .or_else(|| setting.value_integer.map(|v| v.to_string()))
            .or_else(|| setting.value_float.map(|v| v.to_string()))
            .or(setting.value_string)
            .unwrap_or_else(|| "-".to_string());
        Self {
            key: setting.key,
            value,
            updated_at: setting.updated_at,
        }
    }
}

/// Execute settings commands
pub async fn execute(
    args: &SettingsArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let pool = super::create_db_pool(&config).await?;
    let state = AppState::new(config, pool);

    match &args.command {
        SettingsCommand::Show => {
            state.settings_service.load().await?;
            let rows: Vec<SettingRow> = state
                .settings_service
                .list_all()
                .await?
                .into_iter()
                .map(SettingRow::from)
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
