//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use booru_auth::{
    AuthorityLookup, DatabaseAuthority, GuardEnforcer, JwtDecoder, JwtEncoder, PasswordHasher,
    PasswordValidator,
};
use booru_core::config::AppConfig;
use booru_database::repositories::{
    AdminRepository, PermissionRepository, SettingsRepository, TagCategoryRepository,
    TagRepository, UserRepository,
};
use booru_service::{
    AdminService, PermissionService, SettingsService, TagCategoryService, TagService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Evaluates route guards.
    pub guard: Arc<GuardEnforcer>,

    /// Sign-up, sign-in and self-service.
    pub user_service: Arc<UserService>,
    /// Admin bootstrap and management.
    pub admin_service: Arc<AdminService>,
    /// Capability masks.
    pub permission_service: Arc<PermissionService>,
    /// Application settings and the cached bootstrap flag.
    pub settings_service: Arc<SettingsService>,
    /// Tag categories.
    pub tag_category_service: Arc<TagCategoryService>,
    /// Tags.
    pub tag_service: Arc<TagService>,
}

impl AppState {
    /// Wires repositories, auth primitives and services over one pool.
    pub fn new(config: AppConfig, db_pool: PgPool) -> Self {
        // ── Repositories ─────────────────────────────────────────
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let admin_repo = Arc::new(AdminRepository::new(db_pool.clone()));
        let permission_repo = Arc::new(PermissionRepository::new(db_pool.clone()));
        let settings_repo = Arc::new(SettingsRepository::new(db_pool.clone()));
        let category_repo = Arc::new(TagCategoryRepository::new(db_pool.clone()));
        let tag_repo = Arc::new(TagRepository::new(db_pool.clone()));

        // ── Auth ─────────────────────────────────────────────────
        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let authority: Arc<dyn AuthorityLookup> = Arc::new(DatabaseAuthority::new(
            PermissionRepository::new(db_pool.clone()),
            AdminRepository::new(db_pool.clone()),
        ));
        let guard = Arc::new(GuardEnforcer::new(JwtDecoder::new(&config.auth), authority));

        // ── Services ─────────────────────────────────────────────
        let settings_service = Arc::new(SettingsService::new(Arc::clone(&settings_repo)));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&admin_repo),
            Arc::clone(&permission_repo),
            Arc::clone(&hasher),
            Arc::clone(&validator),
            Arc::clone(&encoder),
            config.app.enforce_email,
        ));
        let admin_service = Arc::new(AdminService::new(
            Arc::clone(&user_repo),
            Arc::clone(&admin_repo),
            Arc::clone(&permission_repo),
            Arc::clone(&settings_repo),
            Arc::clone(&settings_service),
            Arc::clone(&user_service),
            hasher,
            validator,
            encoder,
        ));
        let permission_service = Arc::new(PermissionService::new(
            Arc::clone(&permission_repo),
            Arc::clone(&user_repo),
        ));
        let tag_category_service = Arc::new(TagCategoryService::new(Arc::clone(&category_repo)));
        let tag_service = Arc::new(TagService::new(tag_repo, category_repo));

        Self {
            config: Arc::new(config),
            db_pool,
            guard,
            user_service,
            admin_service,
            permission_service,
            settings_service,
            tag_category_service,
            tag_service,
        }
    }
}
