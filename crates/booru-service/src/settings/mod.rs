//! Application settings and the admin bootstrap flag.

pub mod service;

pub use service::SettingsService;
