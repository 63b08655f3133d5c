//! Auth Middleware
//!
//! Resolves the bearer token of protected routes into a [`Principal`]
//! stored in the request extensions.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::principal_resolver::PrincipalResolver;
use crate::domain::entity::Principal;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct PrincipalLayerState {
    pub resolver: Arc<PrincipalResolver>,
}

impl PrincipalLayerState {
    pub fn new(resolver: Arc<PrincipalResolver>) -> Self {
        Self { resolver }
    }
}

/// Middleware that requires a valid bearer token
///
/// Handlers behind it extract `Extension<Principal>`.
pub async fn require_principal(
    State(state): State<PrincipalLayerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let principal: Principal = state.resolver.resolve(req.headers())?;

    tracing::Span::current().record("account_id", principal.subject_id.value());
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
