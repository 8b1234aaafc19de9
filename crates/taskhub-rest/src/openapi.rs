//! OpenAPI documentation configuration.

use crate::controllers::health_controller::HealthResponse;
use taskhub_core::{ErrorResponse, FieldError, TodoId, UserId, UserRole};
use taskhub_service::{
    CreateTodoRequest, LoginRequest, LoginResponse, RegisterRequest, TodoResponse, UpdateTodoRequest,
    UpdateUserRequest, UserResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Taskhub API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taskhub API",
        version = "1.0.0",
        description = "Users and todos behind JWT authentication",
        contact(
            name = "Taskhub Team",
            url = "https://github.com/taskhub/taskhub-rust"
        ),
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        // Auth endpoints
        crate::controllers::auth_controller::login,
        crate::controllers::auth_controller::register,
        // User endpoints
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        // Todo endpoints
        crate::controllers::todo_controller::list_todos,
        crate::controllers::todo_controller::create_todo,
        crate::controllers::todo_controller::update_todo,
        crate::controllers::todo_controller::delete_todo,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            UserId,
            TodoId,
            UserRole,
            ErrorResponse,
            FieldError,
            HealthResponse,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            UpdateUserRequest,
            UserResponse,
            CreateTodoRequest,
            UpdateTodoRequest,
            TodoResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Login and registration"),
        (name = "users", description = "User management (admin)"),
        (name = "todos", description = "Todo management"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Security addon for JWT Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token authentication"))
                        .build(),
                ),
            );
        }
    }
}
