//! Bearer token verification.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use booru_core::config::AuthConfig;

use super::claims::Claims;
use crate::error::AuthError;

/// Scheme prefix expected in the `Authorization` header.
const BEARER_PREFIX: &str = "Bearer ";

/// Validates HS256 bearer tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies the raw value of an `Authorization` header.
    pub fn verify_header(&self, header: Option<&str>) -> Result<Claims, AuthError> {
        let header = header.ok_or(AuthError::MissingToken)?;
        let token = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or_else(|| AuthError::Invalid("expected Bearer scheme".into()))?;
        self.decode(token.trim())
    }

    /// Verifies a bare token string.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AuthError::Invalid("token has expired".into()),
                JwtErrorKind::InvalidSignature => AuthError::Invalid("bad signature".into()),
                _ => AuthError::Invalid(format!("malformed token: {e}")),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use uuid::Uuid;

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            token_lifetime_minutes: 60,
            password_min_length: 8,
            password_min_strength: 0,
        }
    }

    #[test]
    fn test_round_trip_returns_subject() {
        let cfg = config("secret");
        let user_id = Uuid::new_v4();
        let token = JwtEncoder::new(&cfg).issue(user_id, "alice").unwrap();

        let claims = JwtDecoder::new(&cfg)
            .verify_header(Some(&format!("Bearer {token}")))
            .unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_missing_header() {
        let decoder = JwtDecoder::new(&config("secret"));
        assert!(matches!(decoder.verify_header(None), Err(AuthError::MissingToken)));
    }

    #[test]
    fn test_header_without_bearer_prefix_is_invalid() {
        let cfg = config("secret");
        let token = JwtEncoder::new(&cfg).issue(Uuid::new_v4(), "bob").unwrap();
        let decoder = JwtDecoder::new(&cfg);

        assert!(matches!(decoder.verify_header(Some(&token)), Err(AuthError::Invalid(_))));
        assert!(matches!(
            decoder.verify_header(Some(&format!("Token {token}"))),
            Err(AuthError::Invalid(_))
        ));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = JwtEncoder::new(&config("one"))
            .issue(Uuid::new_v4(), "carol")
            .unwrap();
        let result = JwtDecoder::new(&config("two")).decode(&token);
        assert!(matches!(result, Err(AuthError::Invalid(_))));
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let cfg = config("secret");
        let token = JwtEncoder::new(&cfg)
            .issue_with_ttl(Uuid::new_v4(), "dave", Duration::seconds(-5))
            .unwrap();
        let result = JwtDecoder::new(&cfg).decode(&token);
        assert!(matches!(result, Err(AuthError::Invalid(msg)) if msg.contains("expired")));
    }

    #[test]
    fn test_garbage_is_invalid() {
        let decoder = JwtDecoder::new(&config("secret"));
        assert!(matches!(
            decoder.verify_header(Some("Bearer not.a.jwt")),
            Err(AuthError::Invalid(_))
        ));
    }
}
