//! # booru-entity
//!
//! Domain entity models for the booru backend. Every struct in this crate
//! represents a database table row or a domain value object. Row types
//! derive `sqlx::FromRow`; the permission mask is a `bitflags` value type.

pub mod permission;
pub mod settings;
pub mod tag;
pub mod user;
