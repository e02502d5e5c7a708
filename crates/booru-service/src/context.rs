//! Request context carrying the authenticated user.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use booru_auth::Identity;

/// Who is acting on the current request.
///
/// Built from the identity a guard admitted and passed into service
/// methods that act on behalf of the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// Login name from the bearer token.
    pub name: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
        }
    }
}

impl From<Identity> for RequestContext {
    fn from(identity: Identity) -> Self {
        Self::new(identity.user_id, identity.name)
    }
}
