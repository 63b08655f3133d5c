//! Auth (Access Control) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, uniqueness keys
//! - `application/` - Token codec, principal resolver, policy, use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, bearer middleware
//!
//! ## Features
//! - Account registration, login, logout, self-update, admin deletion
//! - Role management (Regular and Admin are built in)
//! - Stateless HS256 bearer tokens
//! - Single policy table for role and ownership checks
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional server-side pepper
//! - Tokens are validated by signature and expiry only; logout does not
//!   revoke them
//! - Every authentication failure answers the same generic 401
//! - Uniqueness is decided by the store's constraints, never by a
//!   lookup before insert

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::principal_resolver::PrincipalResolver;
pub use application::token_codec::TokenCodec;
pub use domain::entity::Principal;
pub use domain::value_object::user_role::UserRole;
pub use error::{AuthError, AuthResult, AuthnError, AuthzError};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod policy {
    pub use crate::application::authorization::*;
}

pub mod guard {
    pub use crate::application::consistency_guard::*;
    pub use crate::domain::uniqueness::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
