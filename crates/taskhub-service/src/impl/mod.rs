//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `user_service.rs`).

pub mod auth_service_impl;
pub mod todo_service_impl;
pub mod user_service_impl;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_service_impl::AuthServiceImpl;
pub use todo_service_impl::TodoServiceImpl;
pub use user_service_impl::UserServiceImpl;
