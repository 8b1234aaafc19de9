//! User service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface, DEFAULT_TTL};
use crate::dto::{UpdateUserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use std::sync::Arc;
use taskhub_core::{TaskhubError, TaskhubResult, UserId, ValidateExt};
use taskhub_repository::UserRepository;
use taskhub_security::PasswordHasherInterface;
use tracing::{debug, info};

/// User service backed by a repository and the user list cache.
pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasherInterface>,
    cache: Arc<dyn CacheInterface>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            cache,
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn find_all(&self) -> TaskhubResult<Vec<UserResponse>> {
        debug!("Listing users");

        self.cache
            .read_through(cache_keys::USERS_FIND_ALL, DEFAULT_TTL, move || async move {
                let users = self.user_repository.find_all().await?;
                Ok(users.into_iter().map(UserResponse::from).collect())
            })
            .await
    }

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> TaskhubResult<UserResponse> {
        debug!("Updating user: {}", id);

        request.validate_request()?;

        let mut user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskhubError::not_found("User", id))?;

        let patch = request.into_patch(|password| self.password_hasher.hash(password))?;
        user.apply_patch(patch);

        let updated = self
            .user_repository
            .update(&user)
            .await?
            .ok_or_else(|| TaskhubError::not_found("User", id))?;

        self.cache.invalidate(cache_keys::USERS_FIND_ALL).await;

        info!("User updated: {}", updated.id);
        Ok(UserResponse::from(updated))
    }

    async fn delete_user(&self, id: UserId) -> TaskhubResult<()> {
        debug!("Deleting user: {}", id);

        if !self.user_repository.delete(id).await? {
            return Err(TaskhubError::not_found("User", id));
        }

        self.cache.invalidate(cache_keys::USERS_FIND_ALL).await;

        info!("User deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::cache_keys::USERS_FIND_ALL;
    use crate::r#impl::test_support::{untouched_cache, CountingHasher, InMemoryUserRepository, MockCache};
    use mockall::predicate::{always, eq};
    use std::sync::atomic::Ordering;
    use taskhub_core::{User, UserRole};

    fn alice() -> User {
        User {
            id: UserId::new(1),
            username: "alice".to_string(),
            password_hash: "hashed:old-secret".to_string(),
            role: UserRole::User,
            full_name: "Alice Liddell".to_string(),
        }
    }

    struct Fixture {
        repo: Arc<InMemoryUserRepository>,
        hasher: Arc<CountingHasher>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                repo: Arc::new(InMemoryUserRepository::with_users(vec![alice()])),
                hasher: Arc::new(CountingHasher::default()),
            }
        }

        fn service(&self, cache: MockCache) -> UserServiceImpl {
            UserServiceImpl::new(self.repo.clone(), self.hasher.clone(), Arc::new(cache))
        }
    }

    fn expect_single_invalidation(cache: &mut MockCache) {
        cache
            .expect_delete()
            .with(eq(USERS_FIND_ALL))
            .times(1)
            .returning(|_| Ok(true));
    }

    #[tokio::test]
    async fn test_find_all_serves_cache_hit() {
        let fixture = Fixture::new();
        let cached = vec![UserResponse::from(User {
            id: UserId::new(42),
            username: "cached".to_string(),
            ..alice()
        })];
        let json = serde_json::to_string(&cached).unwrap();

        let mut cache = MockCache::new();
        cache
            .expect_get_raw()
            .with(eq(USERS_FIND_ALL))
            .times(1)
            .returning(move |_| Ok(Some(json.clone())));
        cache.expect_set_raw().never();

        let users = fixture.service(cache).find_all().await.unwrap();

        assert_eq!(users, cached);
        assert_eq!(fixture.repo.find_all_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_find_all_miss_loads_and_repopulates() {
        let fixture = Fixture::new();

        let mut cache = MockCache::new();
        cache.expect_get_raw().times(1).returning(|_| Ok(None));
        cache
            .expect_set_raw()
            .with(eq(USERS_FIND_ALL), always(), eq(DEFAULT_TTL))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let users = fixture.service(cache).find_all().await.unwrap();

        assert_eq!(users, vec![UserResponse::from(alice())]);
        assert_eq!(fixture.repo.find_all_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_find_all_treats_undecodable_entry_as_miss() {
        let fixture = Fixture::new();

        let mut cache = MockCache::new();
        cache
            .expect_get_raw()
            .returning(|_| Ok(Some("{\"not\":\"a list\"}".to_string())));
        cache.expect_set_raw().times(1).returning(|_, _, _| Ok(()));

        let users = fixture.service(cache).find_all().await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(fixture.repo.find_all_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_find_all_propagates_cache_read_error() {
        let fixture = Fixture::new();

        let mut cache = MockCache::new();
        cache
            .expect_get_raw()
            .returning(|_| Err(TaskhubError::cache("GET 'taskhub:users:find-all' timed out after 5000ms")));
        cache.expect_set_raw().never();

        let result = fixture.service(cache).find_all().await;

        assert!(matches!(result, Err(TaskhubError::Cache(_))));
        assert_eq!(fixture.repo.find_all_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_find_all_ignores_cache_write_failure() {
        let fixture = Fixture::new();

        let mut cache = MockCache::new();
        cache.expect_get_raw().returning(|_| Ok(None));
        cache
            .expect_set_raw()
            .times(1)
            .returning(|_, _, _| Err(TaskhubError::cache("connection reset")));

        let users = fixture.service(cache).find_all().await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_and_invalidates_once() {
        let fixture = Fixture::new();
        let mut cache = MockCache::new();
        expect_single_invalidation(&mut cache);

        let request = UpdateUserRequest {
            full_name: "Alice L.".to_string(),
            ..Default::default()
        };
        let updated = fixture
            .service(cache)
            .update_user(UserId::new(1), request)
            .await
            .unwrap();

        assert_eq!(updated.username, "alice");
        assert_eq!(updated.full_name, "Alice L.");
        assert_eq!(updated.role, UserRole::User);

        let stored = fixture.repo.get(1).unwrap();
        assert_eq!(stored.password_hash, "hashed:old-secret");
        assert_eq!(fixture.hasher.hash_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_rehashes_new_password_and_role() {
        let fixture = Fixture::new();
        let mut cache = MockCache::new();
        expect_single_invalidation(&mut cache);

        let request = UpdateUserRequest {
            password: "new-secret".to_string(),
            role: "admin".to_string(),
            ..Default::default()
        };
        fixture
            .service(cache)
            .update_user(UserId::new(1), request)
            .await
            .unwrap();

        let stored = fixture.repo.get(1).unwrap();
        assert_eq!(stored.password_hash, "hashed:new-secret");
        assert_eq!(stored.role, UserRole::Admin);
        assert_eq!(fixture.hasher.hash_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_update_missing_user_touches_nothing() {
        let fixture = Fixture::new();

        let result = fixture
            .service(untouched_cache())
            .update_user(UserId::new(99), UpdateUserRequest::default())
            .await;

        assert!(matches!(result, Err(TaskhubError::NotFound { .. })));
        assert_eq!(fixture.repo.get(1), Some(alice()));
    }

    #[tokio::test]
    async fn test_update_store_failure_skips_invalidation() {
        let fixture = Fixture::new();
        fixture.repo.fail_writes.store(true, Ordering::SeqCst);

        let request = UpdateUserRequest {
            full_name: "Alice L.".to_string(),
            ..Default::default()
        };
        let result = fixture
            .service(untouched_cache())
            .update_user(UserId::new(1), request)
            .await;

        assert!(matches!(result, Err(TaskhubError::Database(_))));
    }

    #[tokio::test]
    async fn test_delete_invalidates_once() {
        let fixture = Fixture::new();
        let mut cache = MockCache::new();
        expect_single_invalidation(&mut cache);

        fixture.service(cache).delete_user(UserId::new(1)).await.unwrap();

        assert_eq!(fixture.repo.len(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let fixture = Fixture::new();

        let result = fixture.service(untouched_cache()).delete_user(UserId::new(7)).await;

        assert!(matches!(result, Err(TaskhubError::NotFound { .. })));
        assert_eq!(fixture.repo.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_invalidation_does_not_fail_delete() {
        let fixture = Fixture::new();
        let mut cache = MockCache::new();
        cache
            .expect_delete()
            .times(1)
            .returning(|_| Err(TaskhubError::cache("connection reset")));

        assert!(fixture.service(cache).delete_user(UserId::new(1)).await.is_ok());
    }
}
