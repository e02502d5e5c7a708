//! Permission mask use cases.

pub mod service;

pub use service::PermissionService;
