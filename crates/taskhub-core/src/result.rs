//! Result type aliases for Taskhub.

use crate::TaskhubError;

/// A specialized `Result` type for Taskhub operations.
pub type TaskhubResult<T> = Result<T, TaskhubError>;
