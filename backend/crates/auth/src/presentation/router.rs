//! Auth Router

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::principal_resolver::PrincipalResolver;
use crate::application::token_codec::TokenCodec;
use crate::domain::repository::{AccountRepository, RoleRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{PrincipalLayerState, require_principal};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(
    repo: PgAuthRepository,
    config: Arc<AuthConfig>,
    codec: Arc<TokenCodec>,
) -> Router {
    auth_router_generic(repo, config, codec)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: Arc<AuthConfig>, codec: Arc<TokenCodec>) -> Router
where
    R: AccountRepository + RoleRepository + Clone + Send + Sync + 'static,
{
    let layer_state = PrincipalLayerState::new(Arc::new(PrincipalResolver::new(codec.clone())));
    let state = AuthAppState {
        repo: Arc::new(repo),
        config,
        codec,
    };

    let public = Router::new()
        .route("/user", post(handlers::register::<R>))
        .route("/user/login", post(handlers::login::<R>));

    let protected = Router::new()
        .route("/user/logout", post(handlers::logout::<R>))
        .route("/user/me", put(handlers::update_me::<R>))
        .route("/user/{id}", delete(handlers::delete_account::<R>))
        .route(
            "/role",
            get(handlers::list_roles::<R>).post(handlers::create_role::<R>),
        )
        .route("/role/{id}", delete(handlers::delete_role::<R>))
        .route_layer(middleware::from_fn_with_state(layer_state, require_principal));

    public.merge(protected).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryAuthStore;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let config = Arc::new(AuthConfig::development());
        let codec = Arc::new(TokenCodec::from_config(&config));
        auth_router_generic(InMemoryAuthStore::new(), config, codec)
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn register_and_login(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/user",
                None,
                Some(json!({"email": "ann@x.com", "name": "Ann", "password": "longenough1"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/user/login",
                None,
                Some(json!({"email": "ann@x.com", "password": "longenough1"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["account"]["active"], json!(true));
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_register_login_logout_flow() {
        let app = app();
        let token = register_and_login(&app).await;

        let response = app
            .clone()
            .oneshot(request(
                "PUT",
                "/user/me",
                Some(&token),
                Some(json!({"name": "Annie"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["name"], json!("Annie"));

        let response = app
            .clone()
            .oneshot(request("POST", "/user/logout", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_conflict() {
        let app = app();
        register_and_login(&app).await;

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/user",
                None,
                Some(json!({"email": "ANN@x.com", "name": "Ann", "password": "longenough1"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let app = app();
        register_and_login(&app).await;

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/user/login",
                None,
                Some(json!({"email": "ann@x.com", "password": "wrong-password"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_protected_routes_require_bearer_token() {
        let app = app();

        let response = app
            .clone()
            .oneshot(request("GET", "/role", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(request("GET", "/role", Some("not.a.token"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_role_routes_require_admin() {
        let app = app();
        let token = register_and_login(&app).await;

        let response = app
            .clone()
            .oneshot(request("GET", "/role", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/role",
                Some(&token),
                Some(json!({"role_name": "Moderator"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .clone()
            .oneshot(request("DELETE", "/user/1", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
