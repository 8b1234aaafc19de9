//! Todo entity.

use super::overwrite_if_present;
use crate::{TodoId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub content: String,
    /// `None` when no due date was ever set.
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    /// Owner reference; not enforced as a foreign key.
    pub user_id: UserId,
}

impl Todo {
    /// Merges a sparse update onto this todo.
    ///
    /// Empty strings and an absent due date leave the stored values untouched.
    /// `completed` is always taken from the patch.
    pub fn apply_patch(&mut self, patch: TodoPatch) {
        overwrite_if_present(&mut self.title, patch.title);
        overwrite_if_present(&mut self.content, patch.content);
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
        self.completed = patch.completed;
    }
}

/// A todo that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub content: String,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub user_id: UserId,
}

/// Sparse update for a stored todo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: String,
    pub content: String,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
}
