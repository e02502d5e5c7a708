//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Required.
    pub jwt_secret: String,
    /// Bearer token lifetime in minutes.
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_minutes: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Minimum zxcvbn score (0-4). 0 disables the entropy check.
    #[serde(default)]
    pub password_min_strength: u8,
}

fn default_token_lifetime() -> u64 {
    24 * 60
}

fn default_password_min() -> usize {
    8
}
