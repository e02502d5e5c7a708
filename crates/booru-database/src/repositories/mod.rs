//! Repository implementations for all booru entities.

pub mod admin;
pub mod permission;
pub mod settings;
pub mod tag;
pub mod tag_category;
pub mod user;

pub use admin::AdminRepository;
pub use permission::PermissionRepository;
pub use settings::SettingsRepository;
pub use tag::TagRepository;
pub use tag_category::TagCategoryRepository;
pub use user::UserRepository;

/// Name of the constraint a database error violated, if any.
pub(crate) fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}
