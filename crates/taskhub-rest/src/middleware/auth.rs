//! Authentication middleware.

use crate::responses::AppError;
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use taskhub_core::TaskhubError;
use taskhub_security::TokenIssuer;
use tracing::debug;

/// Authentication middleware state.
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub token_issuer: Arc<dyn TokenIssuer>,
}

impl AuthMiddlewareState {
    pub fn new(token_issuer: Arc<dyn TokenIssuer>) -> Self {
        Self { token_issuer }
    }
}

/// Authentication middleware that validates JWT tokens.
///
/// Requests without a valid `Authorization: Bearer <token>` header are
/// rejected with 401. On success the claims are added to the request
/// extensions for the role guards and handlers.
pub async fn auth_middleware(
    State(state): State<AuthMiddlewareState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| TaskhubError::unauthorized("Missing authorization header"))?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| TaskhubError::unauthorized("Invalid authorization format"))?;

    let claims = state.token_issuer.validate_access_token(token)?;
    debug!("Authenticated user: {}", claims.username);

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
