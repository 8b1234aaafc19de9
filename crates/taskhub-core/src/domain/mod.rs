//! Domain entities for Taskhub: users, their roles, and todos.

pub mod role;
pub mod todo;
pub mod user;

pub use role::*;
pub use todo::*;
pub use user::*;

/// Overwrites `target` with `incoming` unless `incoming` is empty.
pub(crate) fn overwrite_if_present(target: &mut String, incoming: String) {
    if !incoming.is_empty() {
        *target = incoming;
    }
}
