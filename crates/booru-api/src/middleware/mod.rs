//! Axum middleware stack.

pub mod cors;
pub mod guard;

pub use cors::build_cors_layer;
pub use guard::{guard, guarded};
