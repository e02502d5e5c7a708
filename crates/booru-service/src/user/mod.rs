//! Account and admin use cases.

pub mod account;
pub mod admin;
pub mod service;

pub use account::NewAccount;
pub use admin::AdminService;
pub use service::UserService;
