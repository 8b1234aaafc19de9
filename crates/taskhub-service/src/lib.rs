//! # Taskhub Service
//!
//! Business logic for users and todos.
//!
//! Every "list all" query goes through a read-through cache keyed by a fixed
//! name, and every successful mutation drops that key afterwards:
//!
//! ```text
//! find_all ──► cache.get_raw(key) ──hit──► decoded list
//!                     │ miss / undecodable
//!                     ▼
//!               repository.find_all ──► cache.set_raw(key, 5 min) (best-effort)
//!
//! create / update / delete ──► repository ──ok──► cache.delete(key) (best-effort)
//! ```

pub mod auth_service;
pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod todo_service;
pub mod user_service;

pub use auth_service::*;
pub use cache::*;
pub use dto::*;
pub use r#impl::*;
pub use todo_service::*;
pub use user_service::*;
