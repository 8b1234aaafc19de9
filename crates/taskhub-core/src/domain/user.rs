//! User entity.

use super::{overwrite_if_present, UserRole};
use crate::UserId;
use serde::{Deserialize, Serialize};

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database-assigned identifier.
    pub id: UserId,

    /// Unique login name.
    pub username: String,

    /// Argon2 hash of the password (never exposed via API).
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Role checked by the route guards.
    pub role: UserRole,

    /// Display name embedded in issued tokens.
    pub full_name: String,
}

impl User {
    /// Checks if the user is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// Merges a sparse update onto this user.
    ///
    /// Empty strings and absent values leave the stored field untouched.
    pub fn apply_patch(&mut self, patch: UserPatch) {
        overwrite_if_present(&mut self.username, patch.username);
        overwrite_if_present(&mut self.full_name, patch.full_name);
        if let Some(password_hash) = patch.password_hash {
            self.password_hash = password_hash;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
    }
}

/// A user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub full_name: String,
}

/// Sparse update for a stored user.
///
/// The password arrives already hashed; hashing is the service's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: String,
    pub full_name: String,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
}
