//! Authentication service implementation.

use crate::auth_service::AuthService;
use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use async_trait::async_trait;
use std::sync::Arc;
use taskhub_core::{NewUser, TaskhubError, TaskhubResult, ValidateExt};
use taskhub_repository::UserRepository;
use taskhub_security::{PasswordHasherInterface, TokenIssuer};
use tracing::{debug, info, warn};

/// Authentication service implementation.
pub struct AuthServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasherInterface>,
    token_issuer: Arc<dyn TokenIssuer>,
    cache: Arc<dyn CacheInterface>,
}

impl AuthServiceImpl {
    /// Creates a new authentication service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        token_issuer: Arc<dyn TokenIssuer>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_issuer,
            cache,
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn login(&self, request: LoginRequest) -> TaskhubResult<LoginResponse> {
        debug!("Login attempt for: {}", request.username);

        request.validate_request()?;

        let user = match self.user_repository.find_by_username(&request.username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("Login failed: user not found - {}", request.username);
                return Err(TaskhubError::InvalidCredentials);
            }
            Err(e) => {
                warn!("Login failed: user lookup error for {} - {}", request.username, e);
                return Err(TaskhubError::InvalidCredentials);
            }
        };

        let verified = self
            .password_hasher
            .verify(&request.password, &user.password_hash)
            .unwrap_or_else(|e| {
                warn!("Login failed: unreadable password hash for user {} - {}", user.id, e);
                false
            });
        if !verified {
            warn!("Login failed: invalid password - {}", user.id);
            return Err(TaskhubError::InvalidCredentials);
        }

        let claims = self.token_issuer.access_claims(&user);
        let token = self.token_issuer.generate_access_token(&claims)?;

        info!("User logged in: {}", user.id);
        Ok(LoginResponse::bearer(token, self.token_issuer.access_token_ttl_secs()))
    }

    async fn register(&self, request: RegisterRequest) -> TaskhubResult<UserResponse> {
        debug!("Registering user: {}", request.username);

        request.validate_request()?;

        if self
            .user_repository
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(TaskhubError::conflict(format!(
                "Username '{}' already exists",
                request.username
            )));
        }

        let password_hash = self.password_hasher.hash(&request.password)?;

        let new_user = NewUser {
            username: request.username,
            password_hash,
            role: request.role.unwrap_or_default(),
            full_name: request.full_name,
        };
        let user = self.user_repository.create(&new_user).await?;

        self.cache.invalidate(cache_keys::USERS_FIND_ALL).await;

        info!("User registered: {}", user.id);
        Ok(UserResponse::from(user))
    }
}
