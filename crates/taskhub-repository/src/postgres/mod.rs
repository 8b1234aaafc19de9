//! PostgreSQL repository implementations.

mod todo_repository;
mod user_repository;

pub use todo_repository::PgTodoRepository;
pub use user_repository::PgUserRepository;
