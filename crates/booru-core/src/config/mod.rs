//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files and `BOORU__`-prefixed environment variables. Each
//! sub-module represents a logical configuration section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod server;

use serde::{Deserialize, Serialize};

pub use self::app::ApplicationConfig;
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::server::{CorsConfig, ServerConfig};

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "BOORU";

/// Environment variable naming the `config/{env}.toml` overlay.
pub const CONFIG_ENV_VAR: &str = "BOORU_CONFIG_ENV";

/// Overlay used when [`CONFIG_ENV_VAR`] is unset.
pub const DEFAULT_CONFIG_ENV: &str = "development";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Authentication settings.
    pub auth: AuthConfig,
    /// Application behaviour toggles.
    #[serde(default)]
    pub app: ApplicationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config/default.toml`, the `config/{env}.toml` overlay and
    /// environment variables such as `BOORU__AUTH__JWT_SECRET`. Both files
    /// are optional.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration for the overlay named by [`CONFIG_ENV_VAR`].
    pub fn load_from_env() -> Result<Self, AppError> {
        let env = std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_ENV.to_string());
        Self::load(&env)
    }

    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must be set"));
        }
        if self.auth.token_lifetime_minutes == 0 {
            return Err(AppError::configuration(
                "auth.token_lifetime_minutes must be greater than zero",
            ));
        }
        if self.auth.password_min_strength > 4 {
            return Err(AppError::configuration(
                "auth.password_min_strength must be between 0 and 4",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> AppConfig {
        serde_json::from_value(serde_json::json!({
            "database": { "url": "postgres://localhost/booru" },
            "auth": { "jwt_secret": "secret" }
        }))
        .expect("minimal config deserializes")
    }

    #[test]
    fn test_defaults_fill_optional_sections() {
        let config = minimal();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert!(config.server.probe_ports);
        assert_eq!(config.auth.token_lifetime_minutes, 24 * 60);
        assert_eq!(config.auth.password_min_length, 8);
        assert!(!config.app.enforce_email);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let mut config = minimal();
        config.auth.jwt_secret = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_token_lifetime_is_rejected() {
        let mut config = minimal();
        config.auth.token_lifetime_minutes = 0;
        assert!(config.validate().is_err());
    }
}
