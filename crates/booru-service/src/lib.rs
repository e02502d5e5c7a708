//! # booru-service
//!
//! Business logic service layer for the booru backend. Each service
//! orchestrates repositories and the auth primitives to implement one
//! group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod permission;
pub mod settings;
pub mod tag;
pub mod transaction;
pub mod user;

pub use context::RequestContext;
pub use permission::PermissionService;
pub use settings::SettingsService;
pub use tag::{TagCategoryService, TagService};
pub use user::{AdminService, NewAccount, UserService};
