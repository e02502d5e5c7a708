//! Admin registry: bootstrap, creation, assignment and removal.

use std::sync::Arc;

use sqlx::{Postgres, Transaction};
use tracing::{info, warn};
use uuid::Uuid;

use booru_auth::{JwtEncoder, PasswordHasher, PasswordValidator};
use booru_core::error::AppError;
use booru_core::result::AppResult;
use booru_core::types::{Page, PageQuery};
use booru_database::repositories::{
    AdminRepository, PermissionRepository, SettingsRepository, UserRepository,
};
use booru_entity::permission::PermissionLevel;
use booru_entity::settings::ADMIN_CREATED;
use booru_entity::user::{Admin, UpdateUser, User, UserDetail};

use super::account::NewAccount;
use super::service::UserService;
use crate::settings::SettingsService;
use crate::transaction;

/// Message returned once the first admin exists.
pub const ADMIN_ALREADY_CREATED: &str = "Admin already created";

/// Handles the admin role.
#[derive(Debug, Clone)]
pub struct AdminService {
    /// User repository.
    users: Arc<UserRepository>,
    /// Admin repository.
    admins: Arc<AdminRepository>,
    /// Permission repository.
    permissions: Arc<PermissionRepository>,
    /// Settings repository, for the locked flag row.
    settings_repo: Arc<SettingsRepository>,
    /// Settings service holding the cached flag.
    settings: Arc<SettingsService>,
    /// Account service, for listings and profile edits.
    user_service: Arc<UserService>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// Token issuer.
    encoder: Arc<JwtEncoder>,
}

impl AdminService {
    /// Creates a new admin service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<UserRepository>,
        admins: Arc<AdminRepository>,
        permissions: Arc<PermissionRepository>,
        settings_repo: Arc<SettingsRepository>,
        settings: Arc<SettingsService>,
        user_service: Arc<UserService>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users,
            admins,
            permissions,
            settings_repo,
            settings,
            user_service,
            hasher,
            validator,
            encoder,
        }
    }

    /// Creates the very first administrator.
    ///
    /// Concurrent calls serialise on the locked `ADMIN_CREATED` row; at
    /// most one commits. Every failure rolls the whole sequence back.
    pub async fn bootstrap(&self, account: NewAccount) -> AppResult<(UserDetail, String)> {
        if self.settings.admin_created() {
            return Err(AppError::forbidden(ADMIN_ALREADY_CREATED));
        }

        let create = account.prepare(&self.hasher, &self.validator)?;

        let mut tx = transaction::begin(self.users.pool()).await?;
        self.settings_repo
            .insert_bool_if_missing(&mut *tx, ADMIN_CREATED, false)
            .await?;
        let flag = self
            .settings_repo
            .lock(&mut *tx, ADMIN_CREATED)
            .await?
            .is_some_and(|s| s.as_bool());

        if flag {
            drop(tx);
            self.settings.set_admin_created(true);
            return Err(AppError::forbidden(ADMIN_ALREADY_CREATED));
        }

        let existing = self.admins.count(&mut *tx).await?;
        if existing > 0 {
            warn!(admins = existing, "Admins exist but ADMIN_CREATED is false, repairing flag");
            self.settings_repo.set_bool(&mut *tx, ADMIN_CREATED, true).await?;
            transaction::commit(tx).await?;
            self.settings.set_admin_created(true);
            return Err(AppError::forbidden(ADMIN_ALREADY_CREATED));
        }

        let user = self.users.create(&mut *tx, &create).await?;
        let result = self.promote_new_user(&mut tx, user).await?;

        let flipped = self
            .settings_repo
            .set_bool_if(&mut *tx, ADMIN_CREATED, false, true)
            .await?;
        if flipped != 1 {
            return Err(AppError::internal(format!(
                "Expected to flip ADMIN_CREATED once, changed {flipped} rows"
            )));
        }

        let token = self.encoder.issue(result.user.id, &result.user.name)?;
        transaction::commit(tx).await?;
        self.settings.set_admin_created(true);

        info!(user_id = %result.user.id, name = %result.user.name, "Initial admin created");
        Ok((result, token))
    }

    /// Creates a brand new account that is an admin from the start.
    pub async fn create_admin(
        &self,
        actor: Uuid,
        account: NewAccount,
    ) -> AppResult<(UserDetail, String)> {
        let create = account.prepare(&self.hasher, &self.validator)?;

        let mut tx = transaction::begin(self.users.pool()).await?;
        let user = self.users.create(&mut *tx, &create).await?;
        let result = self.promote_new_user(&mut tx, user).await?;
        self.settings_repo
            .set_bool_if(&mut *tx, ADMIN_CREATED, false, true)
            .await?;
        let token = self.encoder.issue(result.user.id, &result.user.name)?;
        transaction::commit(tx).await?;
        self.settings.set_admin_created(true);

        info!(user_id = %result.user.id, actor = %actor, "Admin account created");
        Ok((result, token))
    }

    /// Grants the full permission mask and the admin role to a user created
    /// in the same transaction.
    async fn promote_new_user(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        user: User,
    ) -> AppResult<UserDetail> {
        self.permissions
            .create(&mut **tx, user.id, PermissionLevel::ALL)
            .await?;
        self.admins.create(&mut **tx, user.id).await?;
        Ok(UserDetail {
            user,
            is_admin: true,
            permission: Some(PermissionLevel::ALL),
        })
    }

    /// Pages through the users holding the admin role.
    pub async fn list(&self, query: &PageQuery) -> AppResult<Page<UserDetail>> {
        self.user_service.list(query, true).await
    }

    /// Grants the admin role to an existing live user.
    pub async fn assign(&self, user_id: Uuid) -> AppResult<Admin> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found("User not found"));
        }

        let admin = self.admins.create(self.admins.pool(), user_id).await?;
        info!(user_id = %user_id, "Admin role assigned");
        Ok(admin)
    }

    /// Revokes the admin role and returns the removed membership.
    pub async fn remove(&self, user_id: Uuid) -> AppResult<Admin> {
        let admin = self
            .admins
            .delete_by_user_id(self.admins.pool(), user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User is not an admin"))?;
        info!(user_id = %user_id, "Admin role removed");
        Ok(admin)
    }

    /// Whether a user holds the admin role. Unknown users are not admins.
    pub async fn is_admin(&self, user_id: Uuid) -> AppResult<bool> {
        self.admins.exists(user_id).await
    }

    /// Edits another user's profile.
    pub async fn update_user(&self, user_id: Uuid, changes: UpdateUser) -> AppResult<User> {
        self.user_service.update(user_id, changes).await
    }
}
