//! User domain entities.

pub mod admin;
pub mod model;

pub use admin::Admin;
pub use model::{CreateUser, UpdateUser, User, UserDetail};
