//! Authentication service trait definition.

use crate::dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use async_trait::async_trait;
use taskhub_core::{Interface, TaskhubResult};

/// Authentication service trait.
#[async_trait]
pub trait AuthService: Interface + Send + Sync {
    /// Checks credentials and issues an access token.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    async fn login(&self, request: LoginRequest) -> TaskhubResult<LoginResponse>;

    /// Registers a new user.
    async fn register(&self, request: RegisterRequest) -> TaskhubResult<UserResponse>;
}
