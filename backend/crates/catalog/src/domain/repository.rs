//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use auth::guard::InsertOutcome;
use kernel::id::{AccountId, GameId, ReviewId, WishlistEntryId};

use crate::domain::entities::{
    Game, NewReview, NewWishlistEntry, Review, WishlistEntry, WishlistItem,
};
use crate::domain::value_objects::GameDraft;
use crate::error::CatalogResult;

/// Game repository trait
#[trait_variant::make(GameRepository: Send)]
pub trait LocalGameRepository {
    async fn insert_game(&self, draft: &GameDraft) -> CatalogResult<Game>;

    async fn find_game(&self, id: GameId) -> CatalogResult<Option<Game>>;

    async fn list_games(&self) -> CatalogResult<Vec<Game>>;

    /// `None` if the game does not exist
    async fn update_game(&self, id: GameId, draft: &GameDraft) -> CatalogResult<Option<Game>>;

    /// Reviews and wishlist entries of the game go with it
    async fn delete_game(&self, id: GameId) -> CatalogResult<bool>;
}

/// Review repository trait
#[trait_variant::make(ReviewRepository: Send)]
pub trait LocalReviewRepository {
    /// Insert unless the author already reviewed the game;
    /// `GameNotFound` if the game vanished meanwhile
    async fn insert_review(&self, review: &NewReview) -> CatalogResult<InsertOutcome<Review>>;

    async fn find_review(&self, id: ReviewId) -> CatalogResult<Option<Review>>;

    /// All reviews, or those of one game
    async fn list_reviews(&self, game_id: Option<GameId>) -> CatalogResult<Vec<Review>>;

    /// Persist rating and description
    async fn update_review(&self, review: &Review) -> CatalogResult<()>;

    async fn delete_review(&self, id: ReviewId) -> CatalogResult<bool>;
}

/// Wishlist repository trait
#[trait_variant::make(WishlistRepository: Send)]
pub trait LocalWishlistRepository {
    /// Insert unless the game is already on the owner's list
    async fn insert_wish(
        &self,
        entry: &NewWishlistEntry,
    ) -> CatalogResult<InsertOutcome<WishlistEntry>>;

    async fn find_wish(&self, id: WishlistEntryId) -> CatalogResult<Option<WishlistEntry>>;

    async fn list_wishlist(&self, owner_id: AccountId) -> CatalogResult<Vec<WishlistItem>>;

    async fn delete_wish(&self, id: WishlistEntryId) -> CatalogResult<bool>;
}
