//! Todo controller.

use crate::{
    extractors::{AuthenticatedUser, ValidatedJson},
    middleware::guarded,
    responses::{created, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use taskhub_core::TodoId;
use taskhub_security::guards;
use taskhub_service::{CreateTodoRequest, TodoResponse, UpdateTodoRequest};
use tracing::debug;

/// Creates the todo router.
///
/// Listing, creating and updating are open to every role; deleting is
/// admin only.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/todos",
            guarded(get(list_todos), guards::admin_or_user())
                .merge(guarded(post(create_todo), guards::admin_or_user())),
        )
        .route(
            "/todos/:id",
            guarded(put(update_todo), guards::admin_or_user()).merge(guarded(delete(delete_todo), guards::admin())),
        )
}

/// List all todos.
#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All todos", body = [TodoResponse]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Vec<TodoResponse>> {
    debug!("List todos request");

    let todos = state.todo_service.find_all().await?;
    ok("Todos retrieved", todos)
}

/// Create a todo owned by the caller.
#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    security(("bearer_auth" = [])),
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Todo created", body = TodoResponse),
        (status = 422, description = "Invalid todo")
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateTodoRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TodoResponse>>), AppError> {
    debug!("Create todo request from: {}", user.username);

    let owner = user.id()?;
    let todo = state.todo_service.create_todo(owner, request).await?;
    Ok(created("Todo created", todo))
}

/// Update a todo. Empty fields keep their stored values; `completed` is
/// always replaced.
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "todos",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Todo ID")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Todo updated", body = TodoResponse),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "Todo not found")
    )
)]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateTodoRequest>,
) -> ApiResult<TodoResponse> {
    debug!("Update todo request: {}", id);

    let todo_id = TodoId::parse(&id)?;
    let todo = state.todo_service.update_todo(todo_id, request).await?;
    ok("Todo updated", todo)
}

/// Delete a todo.
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Todo not found")
    )
)]
pub async fn delete_todo(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    debug!("Delete todo request: {}", id);

    let todo_id = TodoId::parse(&id)?;
    state.todo_service.delete_todo(todo_id).await?;
    ok("Todo deleted", ())
}
