//! Application state for Axum handlers.

use std::sync::Arc;
use taskhub_security::TokenIssuer;
use taskhub_service::{AuthService, TodoService, UserService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub todo_service: Arc<dyn TodoService>,
    pub token_issuer: Arc<dyn TokenIssuer>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        todo_service: Arc<dyn TodoService>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            todo_service,
            token_issuer,
        }
    }
}
