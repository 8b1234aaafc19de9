//! User-related DTOs.

use serde::{Deserialize, Serialize};
use taskhub_core::{TaskhubError, TaskhubResult, User, UserId, UserPatch, UserRole};
use utoipa::ToSchema;
use validator::Validate;

/// Sparse update of a user. Empty fields keep the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateUserRequest {
    #[validate(length(max = 64, message = "Username cannot exceed 64 characters"))]
    pub username: String,

    /// Re-hashed when non-empty.
    pub password: String,

    #[validate(length(max = 128))]
    pub full_name: String,

    /// `admin` or `user` when non-empty.
    pub role: String,
}

/// Minimum length of a replacement password.
const MIN_PASSWORD_LEN: usize = 6;

/// Minimum length of a replacement username, as on registration.
const MIN_USERNAME_LEN: usize = 3;

impl UpdateUserRequest {
    /// Builds the domain patch.
    ///
    /// `hash_password` runs only for a non-empty password, after the other
    /// fields have been checked. A non-empty role must be `admin` or `user`.
    pub fn into_patch<H>(self, hash_password: H) -> TaskhubResult<UserPatch>
    where
        H: FnOnce(&str) -> TaskhubResult<String>,
    {
        if !self.username.is_empty() && self.username.chars().count() < MIN_USERNAME_LEN {
            return Err(TaskhubError::validation(format!(
                "Username must be at least {} characters",
                MIN_USERNAME_LEN
            )));
        }

        let role = if self.role.is_empty() {
            None
        } else {
            let role = UserRole::parse(&self.role)
                .ok_or_else(|| TaskhubError::validation(format!("Unknown role '{}'", self.role)))?;
            Some(role)
        };

        let password_hash = if self.password.is_empty() {
            None
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(TaskhubError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        } else {
            Some(hash_password(&self.password)?)
        };

        Ok(UserPatch {
            username: self.username,
            full_name: self.full_name,
            password_hash,
            role,
        })
    }
}

/// User as exposed through the API and stored in the list cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub role: UserRole,
    pub full_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            full_name: user.full_name,
        }
    }
}
