//! Guard evaluation.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::authority::AuthorityLookup;
use super::requirement::Requirement;
use crate::error::AuthError;
use crate::jwt::JwtDecoder;

/// The caller a guard admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Authenticated user.
    pub user_id: Uuid,
    /// Login name carried by the token.
    pub name: String,
}

/// Evaluates [`Requirement`]s against a request's `Authorization` header.
#[derive(Clone)]
pub struct GuardEnforcer {
    decoder: JwtDecoder,
    authority: Arc<dyn AuthorityLookup>,
}

impl std::fmt::Debug for GuardEnforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardEnforcer")
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

impl GuardEnforcer {
    /// Creates an enforcer.
    pub fn new(decoder: JwtDecoder, authority: Arc<dyn AuthorityLookup>) -> Self {
        Self { decoder, authority }
    }

    /// Admits the caller if `requirement` holds. The first failing check
    /// short-circuits.
    pub async fn authorize(
        &self,
        header: Option<&str>,
        requirement: Requirement,
    ) -> Result<Identity, AuthError> {
        let claims = self.decoder.verify_header(header)?;
        let identity = Identity {
            user_id: claims.user_id(),
            name: claims.name,
        };

        match requirement {
            Requirement::Authenticated => {}
            Requirement::Permission(required) => {
                let held = self
                    .authority
                    .permission_level(identity.user_id)
                    .await
                    .map_err(AuthError::Lookup)?
                    .ok_or_else(|| AuthError::Denied("no permission row".into()))?;
                if !held.satisfies(required) {
                    return Err(AuthError::Denied(format!(
                        "mask {} does not overlap {}",
                        held.raw(),
                        required.raw()
                    )));
                }
            }
            Requirement::Admin => {
                let is_admin = self
                    .authority
                    .is_admin(identity.user_id)
                    .await
                    .map_err(AuthError::Lookup)?;
                if !is_admin {
                    return Err(AuthError::Denied("not an admin".into()));
                }
            }
        }

        debug!(user_id = %identity.user_id, %requirement, "Guard passed");
        Ok(identity)
    }
}
