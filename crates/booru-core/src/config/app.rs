//! Application behaviour toggles.

use serde::{Deserialize, Serialize};

/// Feature switches that change account semantics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Require an email address at sign-up. Also lowers the default
    /// permission of new accounts to read-only.
    #[serde(default)]
    pub enforce_email: bool,
    /// Development mode: pretty logs with source file and line, whatever
    /// `logging.format` says.
    #[serde(default)]
    pub development: bool,
}
