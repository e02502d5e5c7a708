//! Custom Axum extractors.
//!
//! Every rejection is rendered through [`ApiError`](crate::error::ApiError)
//! so clients always receive the response envelope.

pub mod auth;
pub mod json;
pub mod path;
pub mod query;

pub use auth::AuthUser;
pub use json::ValidatedJson;
pub use path::PathParam;
pub use query::QueryParams;
