//! Catalog Router

use auth::PrincipalResolver;
use auth::middleware::{PrincipalLayerState, require_principal};
use axum::{
    Router, middleware,
    routing::{delete, get, put},
};
use std::sync::Arc;

use crate::domain::repository::{GameRepository, ReviewRepository, WishlistRepository};
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the Catalog router with PostgreSQL repository
pub fn catalog_router(repo: PgCatalogRepository, resolver: Arc<PrincipalResolver>) -> Router {
    catalog_router_generic(repo, resolver)
}

/// Create a generic Catalog router for any repository implementation
pub fn catalog_router_generic<R>(repo: R, resolver: Arc<PrincipalResolver>) -> Router
where
    R: GameRepository + ReviewRepository + WishlistRepository + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/game",
            get(handlers::list_games::<R>).post(handlers::create_game::<R>),
        )
        .route(
            "/game/{id}",
            get(handlers::get_game::<R>)
                .put(handlers::update_game::<R>)
                .delete(handlers::delete_game::<R>),
        )
        .route(
            "/game/review",
            get(handlers::list_reviews::<R>).post(handlers::create_review::<R>),
        )
        .route(
            "/game/review/{id}",
            put(handlers::update_review::<R>).delete(handlers::delete_review::<R>),
        )
        .route(
            "/game/wish",
            get(handlers::list_wishlist::<R>).post(handlers::add_wish::<R>),
        )
        .route("/game/wish/{id}", delete(handlers::remove_wish::<R>))
        .route_layer(middleware::from_fn_with_state(
            PrincipalLayerState::new(resolver),
            require_principal,
        ))
        .with_state(state)
}
