//! User management controller.

use crate::{
    extractors::ValidatedJson,
    middleware::guarded,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Router,
};
use taskhub_core::UserId;
use taskhub_security::guards;
use taskhub_service::{UpdateUserRequest, UserResponse};
use tracing::debug;

/// Creates the user router. Every route is admin only.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", guarded(get(list_users), guards::admin()))
        .route(
            "/users/:id",
            guarded(put(update_user), guards::admin()).merge(guarded(delete(delete_user), guards::admin())),
        )
}

/// List all users.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<UserResponse>> {
    debug!("List users request");

    let users = state.user_service.find_all().await?;
    ok("Users retrieved", users)
}

/// Update a user. Empty fields keep their stored values.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Malformed ID or role"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update user request: {}", id);

    let user_id = UserId::parse(&id)?;
    let user = state.user_service.update_user(user_id, request).await?;
    ok("User updated", user)
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    debug!("Delete user request: {}", id);

    let user_id = UserId::parse(&id)?;
    state.user_service.delete_user(user_id).await?;
    ok("User deleted", ())
}
