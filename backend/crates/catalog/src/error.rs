//! Catalog Error Types
//!
//! Catalog-specific variants on top of the auth taxonomy. Access-control
//! failures and uniqueness conflicts travel as [`CatalogError::Access`].

use auth::error::{AuthError, AuthnError, AuthzError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Rejected input, reported before any storage call
    #[error("{0}")]
    Validation(String),

    #[error("Game not found")]
    GameNotFound,

    #[error("Review not found")]
    ReviewNotFound,

    #[error("Wishlist entry not found")]
    WishNotFound,

    /// Authentication, authorization and uniqueness failures
    #[error(transparent)]
    Access(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthzError> for CatalogError {
    fn from(err: AuthzError) -> Self {
        CatalogError::Access(err.into())
    }
}

impl From<AuthnError> for CatalogError {
    fn from(err: AuthnError) -> Self {
        CatalogError::Access(err.into())
    }
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::BadRequest,
            CatalogError::GameNotFound
            | CatalogError::ReviewNotFound
            | CatalogError::WishNotFound => ErrorKind::NotFound,
            CatalogError::Access(e) => e.kind(),
            CatalogError::Database(sqlx::Error::PoolTimedOut) => ErrorKind::ServiceUnavailable,
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            CatalogError::Access(e) => e.to_app_error(),
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                AppError::new(self.kind(), "Storage failure").with_action("Please try again later")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            CatalogError::Access(e) => e.log(),
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let app_error = err.to_app_error();
        match err {
            CatalogError::Access(e) => e.into(),
            CatalogError::Database(e) => app_error.with_source(e),
            _ => app_error,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
