//! Repository trait definitions.

use async_trait::async_trait;
use taskhub_core::{Interface, NewTodo, NewUser, TaskhubResult, Todo, TodoId, User, UserId};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Returns every stored user ordered by id.
    async fn find_all(&self) -> TaskhubResult<Vec<User>>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> TaskhubResult<Option<User>>;

    /// Finds a user by username.
    async fn find_by_username(&self, username: &str) -> TaskhubResult<Option<User>>;

    /// Inserts a new user. A duplicate username yields `Conflict`.
    async fn create(&self, user: &NewUser) -> TaskhubResult<User>;

    /// Writes every column of `user`. Returns `None` if the row is gone.
    async fn update(&self, user: &User) -> TaskhubResult<Option<User>>;

    /// Deletes a user by ID, returning whether a row was removed.
    async fn delete(&self, id: UserId) -> TaskhubResult<bool>;
}

/// Todo repository trait.
#[async_trait]
pub trait TodoRepository: Interface + Send + Sync {
    /// Returns every stored todo ordered by id.
    async fn find_all(&self) -> TaskhubResult<Vec<Todo>>;

    async fn find_by_id(&self, id: TodoId) -> TaskhubResult<Option<Todo>>;

    async fn create(&self, todo: &NewTodo) -> TaskhubResult<Todo>;

    /// Writes every column of `todo`. Returns `None` if the row is gone.
    async fn update(&self, todo: &Todo) -> TaskhubResult<Option<Todo>>;

    async fn delete(&self, id: TodoId) -> TaskhubResult<bool>;
}
