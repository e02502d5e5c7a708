//! Bearer token creation.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use booru_core::config::AuthConfig;
use booru_core::error::{AppError, ErrorKind};

use super::claims::Claims;

/// Upper bound on token lifetime (ten years).
const MAX_TTL_MINUTES: u64 = 60 * 24 * 3660;

/// Signs HS256 bearer tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token lifetime.
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let minutes = config.token_lifetime_minutes.min(MAX_TTL_MINUTES) as i64;
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::minutes(minutes),
        }
    }

    /// Issues a token for the user with the configured lifetime.
    pub fn issue(&self, user_id: Uuid, name: &str) -> Result<String, AppError> {
        self.issue_with_ttl(user_id, name, self.ttl)
    }

    /// Issues a token that expires `ttl` after now.
    pub fn issue_with_ttl(&self, user_id: Uuid, name: &str, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            name: name.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to sign token", e))
    }
}
