//! # booru-api
//!
//! HTTP API layer for the booru backend built on Axum.
//!
//! Provides every REST endpoint under `/api/v1`, the permission and admin
//! guards, extractors, DTOs, the `{status, data, message}` envelope, error
//! mapping and the server entry point with port probing.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{bind_with_probe, build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
