//! Route guards over the admin registry and permission masks.
//!
//! A guard is a [`Requirement`] checked by the [`GuardEnforcer`]. The
//! enforcer resolves the caller from the bearer token and consults an
//! [`AuthorityLookup`] for roles and capabilities, so the decision can be
//! tested without HTTP or a database.

pub mod authority;
pub mod enforcer;
pub mod requirement;

pub use authority::{AuthorityLookup, DatabaseAuthority};
pub use enforcer::{GuardEnforcer, Identity};
pub use requirement::Requirement;
