//! Todo service trait definition.

use crate::dto::{CreateTodoRequest, TodoResponse, UpdateTodoRequest};
use async_trait::async_trait;
use taskhub_core::{Interface, TaskhubResult, TodoId, UserId};

/// Todo service trait.
#[async_trait]
pub trait TodoService: Interface + Send + Sync {
    /// Lists every todo, served from the list cache when possible.
    async fn find_all(&self) -> TaskhubResult<Vec<TodoResponse>>;

    /// Creates a todo owned by `owner`.
    async fn create_todo(&self, owner: UserId, request: CreateTodoRequest) -> TaskhubResult<TodoResponse>;

    /// Merges a sparse update onto an existing todo.
    async fn update_todo(&self, id: TodoId, request: UpdateTodoRequest) -> TaskhubResult<TodoResponse>;

    /// Deletes a todo.
    async fn delete_todo(&self, id: TodoId) -> TaskhubResult<()>;
}
