//! HTTP Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use kernel::id::{AccountId, RoleId};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_codec::TokenCodec;
use crate::application::{
    DeleteAccountUseCase, LoginInput, LoginUseCase, LogoutUseCase, RegisterInput,
    RegisterUseCase, RoleUseCase, UpdateAccountInput, UpdateAccountUseCase,
};
use crate::domain::entity::Principal;
use crate::domain::repository::{AccountRepository, RoleRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    AccountView, LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RoleRequest,
    RoleView, UpdateAccountRequest,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AccountRepository + RoleRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub codec: Arc<TokenCodec>,
}

// ============================================================================
// Session
// ============================================================================

/// POST /user
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + RoleRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let account = use_case
        .execute(RegisterInput {
            email: req.email,
            name: req.name,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AccountView::from(&account))))
}

/// POST /user/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: AccountRepository + RoleRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        expires_at: output.token.claims().exp,
        token: output.token.into_string(),
        account: AccountView::from(&output.account),
    }))
}

/// POST /user/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    Extension(principal): Extension<Principal>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository + RoleRepository + Clone + Send + Sync + 'static,
{
    LogoutUseCase::new(state.repo.clone())
        .execute(&principal)
        .await?;

    Ok(Json(MessageResponse::new("Logout successful")))
}

// ============================================================================
// Accounts
// ============================================================================

/// PUT /user/me
pub async fn update_me<R>(
    State(state): State<AuthAppState<R>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<UpdateAccountRequest>,
) -> AuthResult<Json<AccountView>>
where
    R: AccountRepository + RoleRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateAccountUseCase::new(state.repo.clone(), state.config.clone());

    let account = use_case
        .execute(
            &principal,
            UpdateAccountInput {
                name: req.name,
                password: req.password,
            },
        )
        .await?;

    Ok(Json(AccountView::from(&account)))
}

/// DELETE /user/{id}
pub async fn delete_account<R>(
    State(state): State<AuthAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository + RoleRepository + Clone + Send + Sync + 'static,
{
    DeleteAccountUseCase::new(state.repo.clone())
        .execute(&principal, AccountId::new(id))
        .await?;

    Ok(Json(MessageResponse::new("Account deleted")))
}

// ============================================================================
// Roles
// ============================================================================

/// POST /role
pub async fn create_role<R>(
    State(state): State<AuthAppState<R>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<RoleRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + RoleRepository + Clone + Send + Sync + 'static,
{
    let role = RoleUseCase::new(state.repo.clone())
        .create(&principal, req.role_name)
        .await?;

    Ok((StatusCode::CREATED, Json(RoleView::from(&role))))
}

/// GET /role
pub async fn list_roles<R>(
    State(state): State<AuthAppState<R>>,
    Extension(principal): Extension<Principal>,
) -> AuthResult<Json<Vec<RoleView>>>
where
    R: AccountRepository + RoleRepository + Clone + Send + Sync + 'static,
{
    let roles = RoleUseCase::new(state.repo.clone()).list(&principal).await?;

    Ok(Json(roles.iter().map(RoleView::from).collect()))
}

/// DELETE /role/{id}
pub async fn delete_role<R>(
    State(state): State<AuthAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository + RoleRepository + Clone + Send + Sync + 'static,
{
    RoleUseCase::new(state.repo.clone())
        .delete(&principal, RoleId::new(id))
        .await?;

    Ok(Json(MessageResponse::new("Role deleted")))
}
