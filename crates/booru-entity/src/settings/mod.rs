//! Application-wide key/value settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Key of the durable "first admin has been created" flag.
pub const ADMIN_CREATED: &str = "ADMIN_CREATED";

/// A typed settings row. Exactly one of the value columns is meaningful
/// for a given key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AppSetting {
    /// Unique setting key.
    pub key: String,
    /// Boolean value.
    pub value_bool: Option<bool>,
    /// Integer value.
    pub value_integer: Option<i64>,
    /// Floating point value.
    pub value_float: Option<f64>,
    /// Text value.
    pub value_string: Option<String>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl AppSetting {
    /// Boolean value, `false` when unset.
    pub fn as_bool(&self) -> bool {
        self.value_bool.unwrap_or(false)
    }
}

/// Public view of the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    /// Whether the first administrator has been created.
    pub admin_created: bool,
}
