//! Maps domain errors to enveloped HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use booru_auth::AuthError;
use booru_core::error::{AppError, ErrorKind};

use crate::dto::response::ApiResponse;

/// Message sent for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type returned by handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Status code for an error kind.
    pub fn status_for(kind: ErrorKind) -> StatusCode {
        match kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication | ErrorKind::Authorization => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = Self::status_for(err.kind);

        let message = if err.kind.is_server_error() {
            match &err.source {
                Some(source) => tracing::error!(kind = %err.kind, error = %err.message, source = %source, "Request failed"),
                None => tracing::error!(kind = %err.kind, error = %err.message, "Request failed"),
            }
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            if let Some(source) = &err.source {
                tracing::debug!(kind = %err.kind, cause = %source, "Request rejected");
            }
            err.message
        };

        (status, Json(ApiResponse::<()>::error(status, message))).into_response()
    }
}
