//! Input for creating accounts.

use booru_auth::{PasswordHasher, PasswordValidator};
use booru_core::error::AppError;
use booru_core::result::AppResult;
use booru_entity::user::CreateUser;

/// Longest accepted login name, in characters.
pub const MAX_NAME_LENGTH: usize = 64;

/// Credentials for a new account, as submitted by a client.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Desired login name.
    pub name: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: String,
}

impl NewAccount {
    /// Creates account input.
    pub fn new(name: impl Into<String>, email: Option<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email,
            password: password.into(),
        }
    }

    /// Normalises the input, checks the password policy and hashes it.
    ///
    /// The name is trimmed; a blank email counts as absent.
    pub fn prepare(
        self,
        hasher: &PasswordHasher,
        validator: &PasswordValidator,
    ) -> AppResult<CreateUser> {
        let name = normalize_name(&self.name)?;
        let email = normalize_email(self.email);

        validator.validate(&self.password)?;
        let password_hash = hasher.hash_password(&self.password)?;

        Ok(CreateUser {
            name,
            email,
            password_hash,
        })
    }
}

/// Trims a login name and rejects blank or overlong ones.
pub fn normalize_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "Name must be at most {MAX_NAME_LENGTH} characters long"
        )));
    }
    Ok(name.to_string())
}

/// Trims an email; blank becomes `None`.
pub fn normalize_email(email: Option<String>) -> Option<String> {
    email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
}
