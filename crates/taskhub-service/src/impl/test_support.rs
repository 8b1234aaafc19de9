//! In-memory collaborators shared by the service tests.

use crate::cache::CacheInterface;
use async_trait::async_trait;
use mockall::mock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use taskhub_core::{NewTodo, NewUser, TaskhubError, TaskhubResult, Todo, TodoId, User, UserId};
use taskhub_repository::{TodoRepository, UserRepository};
use taskhub_security::PasswordHasherInterface;

mock! {
    pub Cache {}

    #[async_trait]
    impl CacheInterface for Cache {
        async fn get_raw(&self, key: &str) -> TaskhubResult<Option<String>>;
        async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> TaskhubResult<()>;
        async fn delete(&self, key: &str) -> TaskhubResult<bool>;
        fn is_enabled(&self) -> bool;
    }
}

/// A cache mock that expects no calls at all.
pub fn untouched_cache() -> MockCache {
    let mut cache = MockCache::new();
    cache.expect_get_raw().never();
    cache.expect_set_raw().never();
    cache.expect_delete().never();
    cache
}

fn store_down() -> TaskhubError {
    TaskhubError::Database("connection refused".to_string())
}

/// Users kept in a map; `fail_writes` makes every mutation fail and
/// `fail_lookups` makes `find_by_username` fail.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<BTreeMap<i64, User>>,
    next_id: AtomicI64,
    pub fail_writes: AtomicBool,
    pub fail_lookups: AtomicBool,
    pub find_all_calls: AtomicUsize,
}

impl InMemoryUserRepository {
    pub fn with_users(users: Vec<User>) -> Self {
        let repo = Self::default();
        let max = users.iter().map(|u| u.id.into_inner()).max().unwrap_or(0);
        repo.next_id.store(max, Ordering::SeqCst);
        repo.users
            .lock()
            .unwrap()
            .extend(users.into_iter().map(|u| (u.id.into_inner(), u)));
        repo
    }

    pub fn get(&self, id: i64) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn check_writes(&self) -> TaskhubResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(store_down())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> TaskhubResult<Vec<User>> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> TaskhubResult<Option<User>> {
        Ok(self.get(id.into_inner()))
    }

    async fn find_by_username(&self, username: &str) -> TaskhubResult<Option<User>> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(TaskhubError::Database(
                "password authentication failed for user \"taskhub\"".to_string(),
            ));
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> TaskhubResult<User> {
        self.check_writes()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = User {
            id: UserId::new(id),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            full_name: user.full_name.clone(),
        };
        self.users.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, user: &User) -> TaskhubResult<Option<User>> {
        self.check_writes()?;
        let mut users = self.users.lock().unwrap();
        Ok(users.get_mut(&user.id.into_inner()).map(|slot| {
            *slot = user.clone();
            slot.clone()
        }))
    }

    async fn delete(&self, id: UserId) -> TaskhubResult<bool> {
        self.check_writes()?;
        Ok(self.users.lock().unwrap().remove(&id.into_inner()).is_some())
    }
}

/// Todos kept in a map; `fail_writes` makes every mutation fail.
#[derive(Default)]
pub struct InMemoryTodoRepository {
    todos: Mutex<BTreeMap<i64, Todo>>,
    next_id: AtomicI64,
    pub fail_writes: AtomicBool,
    pub find_all_calls: AtomicUsize,
}

impl InMemoryTodoRepository {
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let repo = Self::default();
        let max = todos.iter().map(|t| t.id.into_inner()).max().unwrap_or(0);
        repo.next_id.store(max, Ordering::SeqCst);
        repo.todos
            .lock()
            .unwrap()
            .extend(todos.into_iter().map(|t| (t.id.into_inner(), t)));
        repo
    }

    pub fn get(&self, id: i64) -> Option<Todo> {
        self.todos.lock().unwrap().get(&id).cloned()
    }

    fn check_writes(&self) -> TaskhubResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(store_down())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_all(&self) -> TaskhubResult<Vec<Todo>> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.todos.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: TodoId) -> TaskhubResult<Option<Todo>> {
        Ok(self.get(id.into_inner()))
    }

    async fn create(&self, todo: &NewTodo) -> TaskhubResult<Todo> {
        self.check_writes()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = Todo {
            id: TodoId::new(id),
            title: todo.title.clone(),
            content: todo.content.clone(),
            due_date: todo.due_date,
            completed: todo.completed,
            user_id: todo.user_id,
        };
        self.todos.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, todo: &Todo) -> TaskhubResult<Option<Todo>> {
        self.check_writes()?;
        let mut todos = self.todos.lock().unwrap();
        Ok(todos.get_mut(&todo.id.into_inner()).map(|slot| {
            *slot = todo.clone();
            slot.clone()
        }))
    }

    async fn delete(&self, id: TodoId) -> TaskhubResult<bool> {
        self.check_writes()?;
        Ok(self.todos.lock().unwrap().remove(&id.into_inner()).is_some())
    }
}

/// Reversible "hash" that counts how often it was asked to hash.
#[derive(Default)]
pub struct CountingHasher {
    pub hash_calls: AtomicUsize,
}

impl PasswordHasherInterface for CountingHasher {
    fn hash(&self, password: &str) -> TaskhubResult<String> {
        self.hash_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("hashed:{}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> TaskhubResult<bool> {
        let stored = hash
            .strip_prefix("hashed:")
            .ok_or_else(|| TaskhubError::internal("Invalid password hash format"))?;
        Ok(stored == password)
    }
}
