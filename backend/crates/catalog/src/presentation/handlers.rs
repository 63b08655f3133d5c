//! HTTP Handlers
//!
//! Every route sits behind the bearer middleware, so each handler receives
//! the request's `Principal` as an extension.

use auth::Principal;
use auth::presentation::dto::MessageResponse;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use kernel::id::{GameId, ReviewId, WishlistEntryId};
use std::sync::Arc;

use crate::application::{GameInput, GameUseCase, ReviewInput, ReviewUseCase, WishlistUseCase};
use crate::domain::repository::{GameRepository, ReviewRepository, WishlistRepository};
use crate::error::CatalogResult;
use crate::presentation::dto::{
    GameRequest, GameView, ReviewQuery, ReviewRequest, ReviewUpdateRequest, ReviewView,
    WishRequest, WishView, WishlistItemView,
};

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R>
where
    R: GameRepository + ReviewRepository + WishlistRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl From<GameRequest> for GameInput {
    fn from(req: GameRequest) -> Self {
        Self {
            title: req.title,
            developer: req.developer,
            release_date: req.release_date,
            description: req.description,
        }
    }
}

// ============================================================================
// Games
// ============================================================================

/// POST /game
pub async fn create_game<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<GameRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: GameRepository + ReviewRepository + WishlistRepository + Clone + Send + Sync + 'static,
{
    let game = GameUseCase::new(state.repo.clone())
        .create(&principal, req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(GameView::from(&game))))
}

/// GET /game
pub async fn list_games<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(principal): Extension<Principal>,
) -> CatalogResult<Json<Vec<GameView>>>
where
    R: GameRepository + ReviewRepository + WishlistRepository + Clone + Send + Sync + 'static,
{
    let games = GameUseCase::new(state.repo.clone()).list(&principal).await?;

    Ok(Json(games.iter().map(GameView::from).collect()))
}

/// GET /game/{id}
pub async fn get_game<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> CatalogResult<Json<GameView>>
where
    R: GameRepository + ReviewRepository + WishlistRepository + Clone + Send + Sync + 'static,
{
    let game = GameUseCase::new(state.repo.clone())
        .get(&principal, GameId::new(id))
        .await?;

    Ok(Json(GameView::from(&game)))
}

/// PUT /game/{id}
pub async fn update_game<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(req): Json<GameRequest>,
) -> CatalogResult<Json<GameView>>
where
    R: GameRepository + ReviewRepository + WishlistRepository + Clone + Send + Sync + 'static,
{
    let game = GameUseCase::new(state.repo.clone())
        .update(&principal, GameId::new(id), req.into())
        .await?;

    Ok(Json(GameView::from(&game)))
}

/// DELETE /game/{id}
pub async fn delete_game<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: GameRepository + ReviewRepository + WishlistRepository + Clone + Send + Sync + 'static,
{
    GameUseCase::new(state.repo.clone())
        .delete(&principal, GameId::new(id))
        .await?;

    Ok(Json(MessageResponse::new("Game successfully deleted")))
}

// ============================================================================
// Reviews
// ============================================================================

/// POST /game/review
pub async fn create_review<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<ReviewRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: GameRepository + ReviewRepository + WishlistRepository + Clone + Send + Sync + 'static,
{
    let review = ReviewUseCase::new(state.repo.clone())
        .create(
            &principal,
            GameId::new(req.game_id),
            ReviewInput {
                rating: req.rating,
                description: req.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ReviewView::from(&review))))
}

/// GET /game/review
pub async fn list_reviews<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ReviewQuery>,
) -> CatalogResult<Json<Vec<ReviewView>>>
where
    R: GameRepository + ReviewRepository + WishlistRepository + Clone + Send + Sync + 'static,
{
    let reviews = ReviewUseCase::new(state.repo.clone())
        .list(&principal, query.game_id.map(GameId::new))
        .await?;

    Ok(Json(reviews.iter().map(ReviewView::from).collect()))
}

/// PUT /game/review/{id}
pub async fn update_review<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(req): Json<ReviewUpdateRequest>,
) -> CatalogResult<Json<ReviewView>>
where
    R: GameRepository + ReviewRepository + WishlistRepository + Clone + Send + Sync + 'static,
{
    let review = ReviewUseCase::new(state.repo.clone())
        .update(
            &principal,
            ReviewId::new(id),
            ReviewInput {
                rating: req.rating,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(ReviewView::from(&review)))
}

/// DELETE /game/review/{id}
pub async fn delete_review<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: GameRepository + ReviewRepository + WishlistRepository + Clone + Send + Sync + 'static,
{
    ReviewUseCase::new(state.repo.clone())
        .delete(&principal, ReviewId::new(id))
        .await?;

    Ok(Json(MessageResponse::new("Review has been deleted")))
}

// ============================================================================
// Wishlist
// ============================================================================

/// POST /game/wish
pub async fn add_wish<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<WishRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: GameRepository + ReviewRepository + WishlistRepository + Clone + Send + Sync + 'static,
{
    let entry = WishlistUseCase::new(state.repo.clone())
        .add(&principal, req.game_id)
        .await?;

    Ok((StatusCode::CREATED, Json(WishView::from(&entry))))
}

/// GET /game/wish
pub async fn list_wishlist<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(principal): Extension<Principal>,
) -> CatalogResult<Json<Vec<WishlistItemView>>>
where
    R: GameRepository + ReviewRepository + WishlistRepository + Clone + Send + Sync + 'static,
{
    let items = WishlistUseCase::new(state.repo.clone())
        .list_own(&principal)
        .await?;

    Ok(Json(items.iter().map(WishlistItemView::from).collect()))
}

/// DELETE /game/wish/{id}
pub async fn remove_wish<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: GameRepository + ReviewRepository + WishlistRepository + Clone + Send + Sync + 'static,
{
    WishlistUseCase::new(state.repo.clone())
        .remove(&principal, WishlistEntryId::new(id))
        .await?;

    Ok(Json(MessageResponse::new("Wish removed")))
}
