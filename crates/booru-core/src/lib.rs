//! # booru-core
//!
//! Core crate for the booru backend. Contains configuration schemas,
//! paging and sorting types for list endpoints, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other booru crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
