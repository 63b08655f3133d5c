//! Auth Error Types
//!
//! The access-control failure taxonomy. Every failure in the core lands in
//! exactly one variant of [`AuthError`], which maps onto
//! `kernel::error::kind::ErrorKind` at the response boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::application::token_codec::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Why a request could not be tied to a principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthnError {
    /// No `Authorization` header, or an empty one
    #[error("credentials not provided")]
    Missing,

    /// Wrong scheme, bad token, wrong password, unknown email
    #[error("credentials invalid")]
    Invalid,
}

impl From<TokenError> for AuthnError {
    fn from(_: TokenError) -> Self {
        AuthnError::Invalid
    }
}

/// Why an authenticated principal may not perform an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthzError {
    #[error("Administrator role required")]
    InsufficientRole,

    #[error("Only the owner can modify this resource")]
    NotOwner,
}

/// Auth error taxonomy
#[derive(Debug, Error)]
pub enum AuthError {
    /// Rejected input, reported before any storage call
    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthenticated(#[from] AuthnError),

    #[error("{0}")]
    Forbidden(#[from] AuthzError),

    /// A uniqueness key is already taken, or a row is still referenced
    #[error("{0}")]
    Conflict(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// Storage failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        AuthError::Validation(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Unauthenticated(_) => ErrorKind::Unauthorized,
            AuthError::Forbidden(_) => ErrorKind::Forbidden,
            AuthError::Conflict(_) => ErrorKind::Conflict,
            AuthError::NotFound(_) => ErrorKind::NotFound,
            AuthError::Database(sqlx::Error::PoolTimedOut) => ErrorKind::ServiceUnavailable,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Storage details stay in the logs; clients only see a generic message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), "Storage failure").with_action("Please try again later")
            }
            AuthError::Unauthenticated(AuthnError::Missing) => {
                AppError::unauthorized("Unauthorized")
                    .with_action("Send an `Authorization: Bearer <token>` header")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Unauthenticated(AuthnError::Invalid) => {
                tracing::warn!("Rejected invalid credentials");
            }
            AuthError::Forbidden(reason) => {
                tracing::warn!(reason = %reason, "Access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let app_error = err.to_app_error();
        match err {
            AuthError::Database(e) => app_error.with_source(e),
            _ => app_error,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_status_codes() {
        assert_eq!(AuthError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::from(AuthnError::Missing).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::from(AuthzError::NotOwner).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthError::Conflict("Role already exist".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AuthError::NotFound("Account").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AuthError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_token_errors_collapse_to_invalid() {
        assert_eq!(AuthnError::from(TokenError::Expired), AuthnError::Invalid);
        assert_eq!(AuthnError::from(TokenError::BadSignature), AuthnError::Invalid);
        assert_eq!(AuthnError::from(TokenError::Malformed), AuthnError::Invalid);
    }

    #[test]
    fn test_unauthenticated_message_does_not_leak_cause() {
        let missing = AuthError::from(AuthnError::Missing).to_app_error();
        let invalid = AuthError::from(AuthnError::Invalid).to_app_error();
        assert_eq!(missing.message(), "Unauthorized");
        assert_eq!(invalid.message(), "Unauthorized");
    }

    #[test]
    fn test_storage_details_are_hidden() {
        let err: AppError = AuthError::Internal("pool poisoned".into()).into();
        assert_eq!(err.message(), "Storage failure");
        assert!(err.is_server_error());
    }
}
