//! Component wiring.
//!
//! Every component is held behind its `Interface` trait object, so the REST
//! layer and the tests only ever see `Arc<dyn ...>`. The graph is small and
//! needs runtime-built values (the connected pool, the Redis pool, signing
//! keys), so it is assembled by hand instead of through a derive-based
//! container.

use std::sync::Arc;
use taskhub_config::{RedisConfig, SecurityConfig};
use taskhub_core::{TaskhubError, TaskhubResult};
use taskhub_repository::{DatabasePoolInterface, PgTodoRepository, PgUserRepository, TodoRepository, UserRepository};
use taskhub_security::{PasswordHasher, PasswordHasherInterface, TokenIssuer, TokenProvider};
use taskhub_service::{
    AuthService, AuthServiceImpl, CacheInterface, RedisCacheService, TodoService, TodoServiceImpl, UserService,
    UserServiceImpl,
};
use tracing::info;

/// Creates the list cache: Redis when enabled, a no-op cache otherwise.
///
/// The Redis pool connects lazily, so an unreachable server surfaces as
/// cache errors on first use rather than here.
pub fn create_cache(config: &RedisConfig) -> TaskhubResult<Arc<dyn CacheInterface>> {
    if !config.enabled {
        info!("Redis cache disabled");
        return Ok(Arc::new(RedisCacheService::disabled()));
    }

    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(deadpool_redis::PoolConfig::new(config.pool_size));

    let pool = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .map_err(|e| TaskhubError::Cache(format!("Failed to create Redis pool: {}", e)))?;

    info!("Redis cache pool created (max size {})", config.pool_size);
    Ok(Arc::new(RedisCacheService::new(Arc::new(pool))))
}

/// Fully wired application components.
pub struct AppModule {
    cache: Arc<dyn CacheInterface>,
    token_issuer: Arc<dyn TokenIssuer>,
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    todo_service: Arc<dyn TodoService>,
}

impl AppModule {
    pub fn cache(&self) -> Arc<dyn CacheInterface> {
        self.cache.clone()
    }

    pub fn token_issuer(&self) -> Arc<dyn TokenIssuer> {
        self.token_issuer.clone()
    }

    pub fn auth_service(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    pub fn user_service(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    pub fn todo_service(&self) -> Arc<dyn TodoService> {
        self.todo_service.clone()
    }
}

/// Builder for [`AppModule`].
#[derive(Default)]
pub struct AppModuleBuilder {
    database_pool: Option<Arc<dyn DatabasePoolInterface>>,
    cache: Option<Arc<dyn CacheInterface>>,
    security_config: SecurityConfig,
}

impl AppModuleBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_database_pool(mut self, pool: Arc<dyn DatabasePoolInterface>) -> Self {
        self.database_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn CacheInterface>) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn with_security_config(mut self, config: SecurityConfig) -> Self {
        self.security_config = config;
        self
    }

    /// Wires every component.
    ///
    /// A missing cache falls back to the disabled cache; a missing database
    /// pool is a configuration error.
    pub fn build(self) -> TaskhubResult<AppModule> {
        let database_pool = self
            .database_pool
            .ok_or_else(|| TaskhubError::Configuration("Database pool was not provided".to_string()))?;
        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(RedisCacheService::disabled()));
        let password_hasher: Arc<dyn PasswordHasherInterface> =
            Arc::new(PasswordHasher::with_cost(self.security_config.password_hash_cost));
        let token_issuer: Arc<dyn TokenIssuer> = Arc::new(TokenProvider::new(Arc::new(self.security_config)));

        let user_repository: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(database_pool.clone()));
        let todo_repository: Arc<dyn TodoRepository> = Arc::new(PgTodoRepository::new(database_pool));

        let auth_service = Arc::new(AuthServiceImpl::new(
            user_repository.clone(),
            password_hasher.clone(),
            token_issuer.clone(),
            cache.clone(),
        ));
        let user_service = Arc::new(UserServiceImpl::new(user_repository, password_hasher, cache.clone()));
        let todo_service = Arc::new(TodoServiceImpl::new(todo_repository, cache.clone()));

        Ok(AppModule {
            cache,
            token_issuer,
            auth_service,
            user_service,
            todo_service,
        })
    }
}
