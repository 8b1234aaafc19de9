//! PostgreSQL todo repository implementation.

use crate::{traits::TodoRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use taskhub_core::{NewTodo, TaskhubResult, Todo, TodoId, UserId};
use tracing::debug;

/// PostgreSQL todo repository implementation.
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgTodoRepository {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    content: String,
    due_date: Option<DateTime<Utc>>,
    completed: bool,
    user_id: i64,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: TodoId::new(row.id),
            title: row.title,
            content: row.content,
            due_date: row.due_date,
            completed: row.completed,
            user_id: UserId::new(row.user_id),
        }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn find_all(&self) -> TaskhubResult<Vec<Todo>> {
        debug!("Finding all todos");

        let rows = sqlx::query_as::<_, TodoRow>(
            "SELECT id, title, content, due_date, completed, user_id FROM todos ORDER BY id",
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn find_by_id(&self, id: TodoId) -> TaskhubResult<Option<Todo>> {
        debug!("Finding todo by id: {}", id);

        let row = sqlx::query_as::<_, TodoRow>(
            "SELECT id, title, content, due_date, completed, user_id FROM todos WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Todo::from))
    }

    async fn create(&self, todo: &NewTodo) -> TaskhubResult<Todo> {
        debug!("Saving new todo for user: {}", todo.user_id);

        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (title, content, due_date, completed, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, content, due_date, completed, user_id
            "#,
        )
        .bind(&todo.title)
        .bind(&todo.content)
        .bind(todo.due_date)
        .bind(todo.completed)
        .bind(todo.user_id.into_inner())
        .fetch_one(self.pool.inner())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, todo: &Todo) -> TaskhubResult<Option<Todo>> {
        debug!("Updating todo: {}", todo.id);

        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET title = $1, content = $2, due_date = $3, completed = $4, user_id = $5
            WHERE id = $6
            RETURNING id, title, content, due_date, completed, user_id
            "#,
        )
        .bind(&todo.title)
        .bind(&todo.content)
        .bind(todo.due_date)
        .bind(todo.completed)
        .bind(todo.user_id.into_inner())
        .bind(todo.id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Todo::from))
    }

    async fn delete(&self, id: TodoId) -> TaskhubResult<bool> {
        debug!("Deleting todo: {}", id);

        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for PgTodoRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgTodoRepository").finish_non_exhaustive()
    }
}
