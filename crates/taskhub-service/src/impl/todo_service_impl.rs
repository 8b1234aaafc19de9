//! Todo service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface, DEFAULT_TTL};
use crate::dto::{CreateTodoRequest, TodoResponse, UpdateTodoRequest};
use crate::todo_service::TodoService;
use async_trait::async_trait;
use std::sync::Arc;
use taskhub_core::{TaskhubError, TaskhubResult, TodoId, UserId, ValidateExt};
use taskhub_repository::TodoRepository;
use tracing::{debug, info};

/// Todo service backed by a repository and the todo list cache.
pub struct TodoServiceImpl {
    todo_repository: Arc<dyn TodoRepository>,
    cache: Arc<dyn CacheInterface>,
}

impl TodoServiceImpl {
    pub fn new(todo_repository: Arc<dyn TodoRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self { todo_repository, cache }
    }
}

#[async_trait]
impl TodoService for TodoServiceImpl {
    async fn find_all(&self) -> TaskhubResult<Vec<TodoResponse>> {
        debug!("Listing todos");

        self.cache
            .read_through(cache_keys::TODOS_FIND_ALL, DEFAULT_TTL, move || async move {
                let todos = self.todo_repository.find_all().await?;
                Ok(todos.into_iter().map(TodoResponse::from).collect())
            })
            .await
    }

    async fn create_todo(&self, owner: UserId, request: CreateTodoRequest) -> TaskhubResult<TodoResponse> {
        debug!("Creating todo for user: {}", owner);

        request.validate_request()?;

        let todo = self.todo_repository.create(&request.into_new_todo(owner)).await?;

        self.cache.invalidate(cache_keys::TODOS_FIND_ALL).await;

        info!("Todo created: {}", todo.id);
        Ok(TodoResponse::from(todo))
    }

    async fn update_todo(&self, id: TodoId, request: UpdateTodoRequest) -> TaskhubResult<TodoResponse> {
        debug!("Updating todo: {}", id);

        request.validate_request()?;

        let mut todo = self
            .todo_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskhubError::not_found("Todo", id))?;

        todo.apply_patch(request.into());

        let updated = self
            .todo_repository
            .update(&todo)
            .await?
            .ok_or_else(|| TaskhubError::not_found("Todo", id))?;

        self.cache.invalidate(cache_keys::TODOS_FIND_ALL).await;

        info!("Todo updated: {}", updated.id);
        Ok(TodoResponse::from(updated))
    }

    async fn delete_todo(&self, id: TodoId) -> TaskhubResult<()> {
        debug!("Deleting todo: {}", id);

        if !self.todo_repository.delete(id).await? {
            return Err(TaskhubError::not_found("Todo", id));
        }

        self.cache.invalidate(cache_keys::TODOS_FIND_ALL).await;

        info!("Todo deleted: {}", id);
        Ok(())
    }
}
