//! User service trait definition.

use crate::dto::{UpdateUserRequest, UserResponse};
use async_trait::async_trait;
use taskhub_core::{Interface, TaskhubResult, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Lists every user, served from the list cache when possible.
    async fn find_all(&self) -> TaskhubResult<Vec<UserResponse>>;

    /// Merges a sparse update onto an existing user.
    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> TaskhubResult<UserResponse>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> TaskhubResult<()>;
}
