//! Declarative role gating.
//!
//! Each private route carries its own [`PermissionGuard`]; the guard runs as
//! a route layer after [`auth_middleware`](super::auth_middleware) has placed
//! the claims in the request extensions.

use crate::{responses::AppError, state::AppState};
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};
use taskhub_core::TaskhubError;
use taskhub_security::{Claims, PermissionGuard};
use tracing::debug;

/// Rejects the request unless the caller's role is admitted by the guard.
pub async fn enforce_guard(
    State(guard): State<PermissionGuard>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| TaskhubError::unauthorized("Authentication required"))?;

    if let Err(e) = guard.check(claims) {
        debug!(
            "Denied {} {} to {} ({})",
            request.method(),
            request.uri().path(),
            claims.username,
            claims.role
        );
        return Err(e.into());
    }

    Ok(next.run(request).await)
}

/// Attaches `guard` to every method of `route`.
pub fn guarded(route: MethodRouter<AppState>, guard: PermissionGuard) -> MethodRouter<AppState> {
    route.layer(middleware::from_fn_with_state(guard, enforce_guard))
}
