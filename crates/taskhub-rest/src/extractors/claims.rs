//! JWT claims extractor.

use crate::responses::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use taskhub_core::{TaskhubError, UserId};
use taskhub_security::Claims;

/// Extractor for authenticated user claims.
///
/// The claims are placed in the request extensions by the auth middleware;
/// this extractor only reads them back.
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    /// Returns the caller's user ID.
    pub fn id(&self) -> Result<UserId, AppError> {
        self.0
            .user_id()
            .ok_or_else(|| AppError(TaskhubError::InvalidToken("Subject is not a user ID".to_string())))
    }
}

impl std::ops::Deref for AuthenticatedUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| AppError(TaskhubError::unauthorized("Authentication required")))
    }
}
