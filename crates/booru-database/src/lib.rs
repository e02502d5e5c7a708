//! # booru-database
//!
//! PostgreSQL connection management, schema migrations and concrete
//! repositories for every booru entity.
//!
//! Repository methods that take part in multi-step transactions accept any
//! [`sqlx::PgExecutor`], so the same query runs against the pool or inside
//! an open transaction.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
