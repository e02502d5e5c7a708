//! Account lifecycle: sign-up, sign-in, self-service and public lookups.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use booru_auth::{JwtEncoder, PasswordHasher, PasswordValidator};
use booru_core::error::AppError;
use booru_core::result::AppResult;
use booru_core::types::{Page, PageQuery, SortField};
use booru_database::repositories::user::{USER_DEFAULT_SORT, USER_SORT_COLUMNS};
use booru_database::repositories::{AdminRepository, PermissionRepository, UserRepository};
use booru_entity::permission::PermissionLevel;
use booru_entity::user::{UpdateUser, User, UserDetail};

use super::account::{NewAccount, normalize_email, normalize_name};
use crate::context::RequestContext;
use crate::transaction;

/// Handles account creation, authentication and self-service.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    users: Arc<UserRepository>,
    /// Admin repository, for delete cascades.
    admins: Arc<AdminRepository>,
    /// Permission repository.
    permissions: Arc<PermissionRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// Token issuer.
    encoder: Arc<JwtEncoder>,
    /// Whether sign-up requires an email address.
    enforce_email: bool,
}

impl UserService {
    /// Creates a new user service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<UserRepository>,
        admins: Arc<AdminRepository>,
        permissions: Arc<PermissionRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        enforce_email: bool,
    ) -> Self {
        Self {
            users,
            admins,
            permissions,
            hasher,
            validator,
            encoder,
            enforce_email,
        }
    }

    /// Registers a new account with the default permission mask and
    /// returns it together with a bearer token.
    pub async fn sign_up(&self, account: NewAccount) -> AppResult<(UserDetail, String)> {
        if self.enforce_email && normalize_email(account.email.clone()).is_none() {
            return Err(AppError::validation("Email is enforced by administrator"));
        }

        let create = account.prepare(&self.hasher, &self.validator)?;
        let level = PermissionLevel::sign_up_default(self.enforce_email);

        let mut tx = transaction::begin(self.users.pool()).await?;
        let user = self.users.create(&mut *tx, &create).await?;
        self.permissions.create(&mut *tx, user.id, level).await?;
        let token = self.encoder.issue(user.id, &user.name)?;
        transaction::commit(tx).await?;

        info!(user_id = %user.id, name = %user.name, permission = level.raw(), "User signed up");

        Ok((
            UserDetail {
                user,
                is_admin: false,
                permission: Some(level),
            },
            token,
        ))
    }

    /// Verifies credentials and issues a bearer token.
    ///
    /// `login` matches either the name or the email of a live account.
    pub async fn sign_in(&self, login: &str, password: &str) -> AppResult<String> {
        let user = self
            .users
            .find_by_name_or_email(login.trim())
            .await?
            .ok_or_else(|| AppError::authentication("Invalid credentials"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            debug!(user_id = %user.id, "Sign-in rejected: wrong password");
            return Err(AppError::authentication("Invalid credentials"));
        }

        info!(user_id = %user.id, "User signed in");
        self.encoder.issue(user.id, &user.name)
    }

    /// Gets a live user with admin flag and permission mask.
    pub async fn get(&self, user_id: Uuid) -> AppResult<UserDetail> {
        self.users
            .find_detail_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Gets the caller's own account.
    pub async fn get_self(&self, ctx: &RequestContext) -> AppResult<UserDetail> {
        self.get(ctx.user_id).await
    }

    /// Pages through live users, optionally admins only.
    pub async fn list(&self, query: &PageQuery, admins_only: bool) -> AppResult<Page<UserDetail>> {
        let window = query.window()?;
        let sort = SortField::parse(query.sort.as_deref(), USER_SORT_COLUMNS, USER_DEFAULT_SORT)?;

        let (rows, total) = self
            .users
            .list(&query.keyword_pattern(), admins_only, sort, window)
            .await?;
        Ok(Page::new(rows, window, total))
    }

    /// Changes profile fields of a user. At least one field is required.
    pub async fn update(&self, user_id: Uuid, changes: UpdateUser) -> AppResult<User> {
        let changes = UpdateUser {
            name: changes.name.as_deref().map(normalize_name).transpose()?,
            email: normalize_email(changes.email),
        };
        if changes.is_empty() {
            return Err(AppError::validation("Nothing to update"));
        }

        let user = self.users.update(user_id, &changes).await?;
        info!(user_id = %user_id, "User profile updated");
        Ok(user)
    }

    /// Changes the caller's own profile fields.
    pub async fn update_self(&self, ctx: &RequestContext, changes: UpdateUser) -> AppResult<User> {
        self.update(ctx.user_id, changes).await
    }

    /// Changes the caller's password after verifying the old one.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self
            .users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !self.hasher.verify_password(old_password, &user.password_hash)? {
            return Err(AppError::authentication("Old password is incorrect"));
        }

        self.validator.validate(new_password)?;
        self.validator.validate_not_same(old_password, new_password)?;

        let new_hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(ctx.user_id, &new_hash).await?;

        info!(user_id = %ctx.user_id, "Password changed");
        Ok(())
    }

    /// Soft deletes a user and removes its admin and permission rows in
    /// one transaction.
    pub async fn delete(&self, user_id: Uuid) -> AppResult<()> {
        let mut tx = transaction::begin(self.users.pool()).await?;
        self.admins.delete_by_user_id(&mut *tx, user_id).await?;
        self.permissions.delete_by_user_id(&mut *tx, user_id).await?;
        if self.users.soft_delete(&mut *tx, user_id).await? == 0 {
            return Err(AppError::not_found("User not found"));
        }
        transaction::commit(tx).await?;

        info!(user_id = %user_id, "User deleted");
        Ok(())
    }

    /// Deletes the caller's own account.
    pub async fn delete_self(&self, ctx: &RequestContext) -> AppResult<()> {
        self.delete(ctx.user_id).await
    }
}
