//! Todo-related DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskhub_core::{NewTodo, Todo, TodoId, TodoPatch, UserId};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a todo. The owner is the authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub completed: bool,
}

impl CreateTodoRequest {
    #[must_use]
    pub fn into_new_todo(self, owner: UserId) -> NewTodo {
        NewTodo {
            title: self.title,
            content: self.content,
            due_date: self.due_date,
            completed: self.completed,
            user_id: owner,
        }
    }
}

/// Sparse update of a todo.
///
/// Empty strings and a missing due date keep the stored value; `completed`
/// always replaces it, so omitting it marks the todo as not completed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateTodoRequest {
    #[validate(length(max = 255, message = "Title cannot exceed 255 characters"))]
    pub title: String,
    pub content: String,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
}

impl From<UpdateTodoRequest> for TodoPatch {
    fn from(request: UpdateTodoRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
            due_date: request.due_date,
            completed: request.completed,
        }
    }
}

/// Todo as exposed through the API and stored in the list cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoResponse {
    pub id: TodoId,
    pub title: String,
    pub content: String,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub user_id: UserId,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            content: todo.content,
            due_date: todo.due_date,
            completed: todo.completed,
            user_id: todo.user_id,
        }
    }
}
