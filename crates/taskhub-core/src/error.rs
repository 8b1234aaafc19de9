//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Taskhub.
///
/// Variants fall into three groups: domain errors raised by the services,
/// authentication errors, and upstream errors coming from the store or the
/// cache. Each maps to exactly one HTTP status via [`status_code`](Self::status_code).
#[derive(Error, Debug)]
pub enum TaskhubError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error (e.g., duplicate username)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Authentication/Authorization Errors ============
    /// Unauthorized access
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Forbidden access
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid token
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token expired
    #[error("Token expired")]
    TokenExpired,

    /// Invalid credentials, identical for unknown users and wrong passwords.
    #[error("Invalid credentials")]
    InvalidCredentials,

    // ============ Upstream Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TaskhubError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Unauthorized(_) | Self::InvalidToken(_) | Self::TokenExpired | Self::InvalidCredentials => 401,
            Self::Forbidden(_) => 403,
            Self::Timeout(_) => 503,
            Self::Database(_)
            | Self::Cache(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a forbidden error.
    #[must_use]
    pub fn forbidden<T: Into<String>>(message: T) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::Cache(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns the message shown to API clients.
    ///
    /// Server-side failures get a fixed message; their detail is only logged.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Timeout(_) => "Request timed out".to_string(),
            Self::Database(_)
            | Self::Cache(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for TaskhubError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                // PostgreSQL unique_violation
                if db_err.code().as_deref() == Some("23505") {
                    let message = match db_err.constraint() {
                        Some("users_username_key") => "Username already exists",
                        _ => "Resource already exists",
                    };
                    return Self::Conflict(message.to_string());
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for TaskhubError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error body carried in the failure envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `TaskhubError`.
    #[must_use]
    pub fn from_error(error: &TaskhubError) -> Self {
        Self {
            status: error.status_code(),
            code: error.error_code().to_string(),
            message: error.public_message(),
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&TaskhubError> for ErrorResponse {
    fn from(error: &TaskhubError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(TaskhubError::not_found("User", 1).status_code(), 404);
        assert_eq!(TaskhubError::validation("invalid id").status_code(), 400);
        assert_eq!(TaskhubError::unauthorized("not logged in").status_code(), 401);
        assert_eq!(TaskhubError::forbidden("no permission").status_code(), 403);
        assert_eq!(TaskhubError::conflict("duplicate").status_code(), 409);
    }

    #[test]
    fn test_upstream_status_codes() {
        assert_eq!(TaskhubError::Database("db error".to_string()).status_code(), 500);
        assert_eq!(TaskhubError::cache("redis down").status_code(), 500);
        assert_eq!(TaskhubError::internal("oops").status_code(), 500);
        assert_eq!(TaskhubError::Timeout("timed out".to_string()).status_code(), 503);
    }

    #[test]
    fn test_auth_errors_are_unauthorized() {
        assert_eq!(TaskhubError::InvalidToken("bad".to_string()).status_code(), 401);
        assert_eq!(TaskhubError::TokenExpired.status_code(), 401);
        assert_eq!(TaskhubError::InvalidCredentials.status_code(), 401);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(TaskhubError::not_found("User", 1).error_code(), "NOT_FOUND");
        assert_eq!(TaskhubError::conflict("duplicate").error_code(), "CONFLICT");
        assert_eq!(TaskhubError::InvalidCredentials.error_code(), "INVALID_CREDENTIALS");
        assert_eq!(TaskhubError::cache("err").error_code(), "CACHE_ERROR");
        assert_eq!(TaskhubError::internal("err").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_invalid_credentials_message_has_no_detail() {
        assert_eq!(TaskhubError::InvalidCredentials.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_server_errors_hide_detail_from_clients() {
        let errors = [
            TaskhubError::Database("password authentication failed for user \"taskhub\"".to_string()),
            TaskhubError::cache("GET 'taskhub:users:find-all' failed: redis://10.0.0.5:6379"),
            TaskhubError::internal("JSON serialization error: trailing comma"),
            TaskhubError::Configuration("Database URL is required".to_string()),
            TaskhubError::Other(anyhow::anyhow!("secret detail")),
        ];
        for err in &errors {
            let response = ErrorResponse::from_error(err);
            assert_eq!(response.status, 500);
            assert_eq!(response.message, "Internal server error");
        }

        let json = serde_json::to_string(&ErrorResponse::from_error(&errors[0])).unwrap();
        assert!(!json.contains("password authentication"));
    }

    #[test]
    fn test_timeout_has_stable_message() {
        let response = ErrorResponse::from_error(&TaskhubError::Timeout("GET /todos after 30s".to_string()));
        assert_eq!(response.status, 503);
        assert_eq!(response.message, "Request timed out");
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let err = TaskhubError::conflict("Username 'bob' is already taken");
        assert_eq!(ErrorResponse::from_error(&err).message, err.to_string());
    }

    #[test]
    fn test_not_found_message_names_resource() {
        let err = TaskhubError::not_found("Todo", 42);
        assert!(err.to_string().contains("Todo"));
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_error_response_from_error() {
        let err = TaskhubError::not_found("User", 1);
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.status, 404);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(!response.message.is_empty());
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let err = TaskhubError::validation("bad input");
        let details = vec![FieldError {
            field: "username".to_string(),
            message: "Username is required".to_string(),
            code: "length".to_string(),
        }];
        let response = ErrorResponse::from(&err).with_details(details);
        assert_eq!(response.status, 400);
        assert_eq!(response.details.map(|d| d.len()), Some(1));
    }

    #[test]
    fn test_error_response_skips_empty_details() {
        let response = ErrorResponse::from_error(&TaskhubError::conflict("dup"));
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("details").is_none());
        assert_eq!(json["status"], 409);
    }
}
