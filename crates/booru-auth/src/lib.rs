//! # booru-auth
//!
//! Authentication and authorization for the booru backend.
//!
//! ## Modules
//!
//! - `jwt`: bearer token issuing and verification
//! - `password`: Argon2id hashing and password policy
//! - `rbac`: permission, admin and identity guards
//! - `error`: guard failure type

pub mod error;
pub mod jwt;
pub mod password;
pub mod rbac;

pub use error::AuthError;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{AuthorityLookup, DatabaseAuthority, GuardEnforcer, Identity, Requirement};
