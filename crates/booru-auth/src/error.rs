//! Guard failures.

use thiserror::Error;

use booru_core::error::{AppError, ErrorKind};

/// Why a request could not be authenticated or authorized.
///
/// Every variant is reported to clients as the same `401 Unauthorized`;
/// the detail is only logged.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization` header was sent.
    #[error("missing authorization header")]
    MissingToken,
    /// The header or the token it carries is not acceptable.
    #[error("invalid token: {0}")]
    Invalid(String),
    /// The caller is known but lacks the required capability.
    #[error("access denied: {0}")]
    Denied(String),
    /// The authority could not be consulted.
    #[error("authority lookup failed: {0}")]
    Lookup(#[source] AppError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::with_source(ErrorKind::Authentication, "Unauthorized", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_maps_to_unauthorized() {
        let errors = [
            AuthError::MissingToken,
            AuthError::Invalid("bad signature".into()),
            AuthError::Denied("no overlap".into()),
            AuthError::Lookup(AppError::database("down")),
        ];
        for err in errors {
            let app: AppError = err.into();
            assert_eq!(app.kind, ErrorKind::Authentication);
            assert_eq!(app.message, "Unauthorized");
        }
    }
}
