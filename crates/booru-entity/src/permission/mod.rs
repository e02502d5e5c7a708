//! Global capability masks.

pub mod level;
pub mod model;

pub use level::PermissionLevel;
pub use model::Permission;
