//! Capability bitmask.
//!
//! Each account holds a set of global capabilities stored as an integer
//! mask. Masks combine with `|` only; there is deliberately no `+`.
//!
//! ```
//! use booru_entity::permission::PermissionLevel;
//!
//! let user = PermissionLevel::READ | PermissionLevel::WRITE;
//! assert!(user.satisfies(PermissionLevel::WRITE));
//! assert!(!user.satisfies(PermissionLevel::MODERATE));
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use booru_core::error::AppError;
use booru_core::result::AppResult;

/// A user's global capabilities.
///
/// | Flag | Bit |
/// |------|-----|
/// | [`READ`](Self::READ) | 1 |
/// | [`WRITE`](Self::WRITE) | 2 |
/// | [`APPROVE`](Self::APPROVE) | 4 |
/// | [`MODERATE`](Self::MODERATE) | 8 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct PermissionLevel(i32);

bitflags! {
    impl PermissionLevel: i32 {
        /// Browse content.
        const READ     = 0b0001;
        /// Upload and edit content.
        const WRITE    = 0b0010;
        /// Approve pending content.
        const APPROVE  = 0b0100;
        /// Moderate users and content.
        const MODERATE = 0b1000;
    }
}

impl PermissionLevel {
    /// Every known capability.
    pub const ALL: Self = Self::READ
        .union(Self::WRITE)
        .union(Self::APPROVE)
        .union(Self::MODERATE);

    /// Whether this mask grants `required`.
    ///
    /// A requirement is met when at least one of its bits is held. An empty
    /// requirement is never met.
    #[must_use]
    pub fn satisfies(self, required: Self) -> bool {
        self.intersects(required)
    }

    /// Mask assigned to newly signed-up accounts.
    ///
    /// Accounts start read-only while email enforcement is on, otherwise
    /// they may also write.
    #[must_use]
    pub fn sign_up_default(enforce_email: bool) -> Self {
        if enforce_email {
            Self::READ
        } else {
            Self::WRITE | Self::READ
        }
    }

    /// Convert a raw integer, rejecting unknown or negative bits.
    pub fn try_from_raw(raw: i32) -> AppResult<Self> {
        Self::from_bits(raw).ok_or_else(|| {
            AppError::validation(format!(
                "Invalid permission level {raw}: expected a combination of 1, 2, 4 and 8"
            ))
        })
    }

    /// Raw integer value.
    #[must_use]
    pub fn raw(self) -> i32 {
        self.bits()
    }

    /// Human-readable flag names, least significant first.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }

    /// Parse a flag name (case-insensitive). `ALL` selects every flag.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_uppercase().as_str() {
            "READ" => Some(Self::READ),
            "WRITE" => Some(Self::WRITE),
            "APPROVE" => Some(Self::APPROVE),
            "MODERATE" => Some(Self::MODERATE),
            "ALL" => Some(Self::ALL),
            _ => None,
        }
    }
}
