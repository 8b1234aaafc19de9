//! # Taskhub Repository
//!
//! Persistence port for users and todos.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository> / Arc<dyn TodoRepository>
//! PgUserRepository / PgTodoRepository   (SQLx)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! PostgreSQL
//! ```
//!
//! A missing row is reported as `Ok(None)` (or `Ok(false)` for deletes),
//! never as an error, so callers can tell "not found" apart from a failing
//! database.

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
