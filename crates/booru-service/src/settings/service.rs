//! Settings service.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use booru_core::result::AppResult;
use booru_database::repositories::SettingsRepository;
use booru_entity::settings::{ADMIN_CREATED, AppSetting, SettingsSnapshot};

/// Exposes settings and caches the "first admin created" flag.
///
/// The cached flag is only a fast path. The `ADMIN_CREATED` row, read
/// under lock inside the bootstrap transaction, decides.
#[derive(Debug)]
pub struct SettingsService {
    /// Settings repository.
    repo: Arc<SettingsRepository>,
    /// Cached copy of `ADMIN_CREATED`.
    admin_created: AtomicBool,
}

impl SettingsService {
    /// Creates a new settings service. The flag starts unset until
    /// [`load`](Self::load) runs.
    pub fn new(repo: Arc<SettingsRepository>) -> Self {
        Self {
            repo,
            admin_created: AtomicBool::new(false),
        }
    }

    /// Seeds missing settings and loads the bootstrap flag into memory.
    pub async fn load(&self) -> AppResult<SettingsSnapshot> {
        let setting = self.repo.ensure_bool(ADMIN_CREATED, false).await?;
        self.set_admin_created(setting.as_bool());
        info!(admin_created = setting.as_bool(), "Settings loaded");
        Ok(self.cached())
    }

    /// Reads the durable settings and reconciles the cache.
    pub async fn snapshot(&self) -> AppResult<SettingsSnapshot> {
        let admin_created = self
            .repo
            .find(ADMIN_CREATED)
            .await?
            .is_some_and(|s| s.as_bool());
        if admin_created {
            self.set_admin_created(true);
        }
        Ok(SettingsSnapshot { admin_created })
    }

    /// Every stored setting.
    pub async fn list_all(&self) -> AppResult<Vec<AppSetting>> {
        self.repo.list_all().await
    }

    /// Cached view without touching the database.
    pub fn cached(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            admin_created: self.admin_created(),
        }
    }

    /// Cached bootstrap flag.
    pub fn admin_created(&self) -> bool {
        self.admin_created.load(Ordering::Acquire)
    }

    /// Updates the cached bootstrap flag.
    pub fn set_admin_created(&self, value: bool) {
        self.admin_created.store(value, Ordering::Release);
    }
}
