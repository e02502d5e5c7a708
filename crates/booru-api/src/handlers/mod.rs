//! HTTP handlers grouped by domain.

pub mod admin;
pub mod heartbeat;
pub mod settings;
pub mod tag;
pub mod user;
