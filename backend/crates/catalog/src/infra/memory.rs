//! In-memory repository
//!
//! Mirrors the database constraints: one review and one wish per
//! (account, game), and deleting a game removes its reviews and wishes.

use std::collections::BTreeMap;
use std::sync::Arc;

use auth::guard::InsertOutcome;
use chrono::Utc;
use kernel::id::{AccountId, GameId, ReviewId, WishlistEntryId};
use tokio::sync::Mutex;

use crate::domain::entities::{
    Game, NewReview, NewWishlistEntry, Review, WishlistEntry, WishlistItem,
};
use crate::domain::repository::{GameRepository, ReviewRepository, WishlistRepository};
use crate::domain::value_objects::GameDraft;
use crate::error::{CatalogError, CatalogResult};

#[derive(Default)]
struct CatalogTables {
    games: BTreeMap<GameId, Game>,
    reviews: BTreeMap<ReviewId, Review>,
    wishes: BTreeMap<WishlistEntryId, WishlistEntry>,
    last_game_id: i64,
    last_review_id: i64,
    last_wish_id: i64,
}

/// Shared in-memory catalog tables
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    tables: Arc<Mutex<CatalogTables>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameRepository for InMemoryCatalogStore {
    async fn insert_game(&self, draft: &GameDraft) -> CatalogResult<Game> {
        let mut tables = self.tables.lock().await;
        tables.last_game_id += 1;
        let id = GameId::new(tables.last_game_id);
        let game = Game::from_draft(id, draft.clone(), Utc::now());
        tables.games.insert(id, game.clone());
        Ok(game)
    }

    async fn find_game(&self, id: GameId) -> CatalogResult<Option<Game>> {
        Ok(self.tables.lock().await.games.get(&id).cloned())
    }

    async fn list_games(&self) -> CatalogResult<Vec<Game>> {
        Ok(self.tables.lock().await.games.values().cloned().collect())
    }

    async fn update_game(&self, id: GameId, draft: &GameDraft) -> CatalogResult<Option<Game>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.games.get_mut(&id).map(|game| {
            game.apply(draft.clone());
            game.clone()
        }))
    }

    async fn delete_game(&self, id: GameId) -> CatalogResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.games.remove(&id).is_none() {
            return Ok(false);
        }
        tables.reviews.retain(|_, r| r.game_id != id);
        tables.wishes.retain(|_, w| w.game_id != id);
        Ok(true)
    }
}

impl ReviewRepository for InMemoryCatalogStore {
    async fn insert_review(&self, review: &NewReview) -> CatalogResult<InsertOutcome<Review>> {
        let mut tables = self.tables.lock().await;
        if tables
            .reviews
            .values()
            .any(|r| r.author_id == review.author_id && r.game_id == review.game_id)
        {
            return Ok(InsertOutcome::Duplicate);
        }
        if !tables.games.contains_key(&review.game_id) {
            return Err(CatalogError::GameNotFound);
        }

        tables.last_review_id += 1;
        let id = ReviewId::new(tables.last_review_id);
        let created = review.clone().into_review(id);
        tables.reviews.insert(id, created.clone());
        Ok(InsertOutcome::Created(created))
    }

    async fn find_review(&self, id: ReviewId) -> CatalogResult<Option<Review>> {
        Ok(self.tables.lock().await.reviews.get(&id).cloned())
    }

    async fn list_reviews(&self, game_id: Option<GameId>) -> CatalogResult<Vec<Review>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .reviews
            .values()
            .filter(|r| game_id.is_none_or(|g| r.game_id == g))
            .cloned()
            .collect())
    }

    async fn update_review(&self, review: &Review) -> CatalogResult<()> {
        let mut tables = self.tables.lock().await;
        let stored = tables
            .reviews
            .get_mut(&review.id)
            .ok_or(CatalogError::ReviewNotFound)?;
        stored.rating = review.rating;
        stored.description = review.description.clone();
        stored.updated_at = review.updated_at;
        Ok(())
    }

    async fn delete_review(&self, id: ReviewId) -> CatalogResult<bool> {
        Ok(self.tables.lock().await.reviews.remove(&id).is_some())
    }
}

impl WishlistRepository for InMemoryCatalogStore {
    async fn insert_wish(
        &self,
        entry: &NewWishlistEntry,
    ) -> CatalogResult<InsertOutcome<WishlistEntry>> {
        let mut tables = self.tables.lock().await;
        if tables
            .wishes
            .values()
            .any(|w| w.owner_id == entry.owner_id && w.game_id == entry.game_id)
        {
            return Ok(InsertOutcome::Duplicate);
        }
        if !tables.games.contains_key(&entry.game_id) {
            return Err(CatalogError::GameNotFound);
        }

        tables.last_wish_id += 1;
        let id = WishlistEntryId::new(tables.last_wish_id);
        let created = entry.clone().into_entry(id);
        tables.wishes.insert(id, created.clone());
        Ok(InsertOutcome::Created(created))
    }

    async fn find_wish(&self, id: WishlistEntryId) -> CatalogResult<Option<WishlistEntry>> {
        Ok(self.tables.lock().await.wishes.get(&id).cloned())
    }

    async fn list_wishlist(&self, owner_id: AccountId) -> CatalogResult<Vec<WishlistItem>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .wishes
            .values()
            .filter(|w| w.owner_id == owner_id)
            .filter_map(|w| {
                tables.games.get(&w.game_id).map(|game| WishlistItem {
                    entry: w.clone(),
                    game_title: game.title.clone(),
                })
            })
            .collect())
    }

    async fn delete_wish(&self, id: WishlistEntryId) -> CatalogResult<bool> {
        Ok(self.tables.lock().await.wishes.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Rating, ReviewText};

    #[tokio::test]
    async fn test_deleting_game_cascades() {
        let store = InMemoryCatalogStore::new();
        let draft = GameDraft::new("Celeste", "Maddy Makes Games", "2018-01-25", "Platformer")
            .unwrap();
        let game = store.insert_game(&draft).await.unwrap();
        let author = AccountId::new(5);

        let review = NewReview::new(
            author,
            game.id,
            Rating::new(10).unwrap(),
            ReviewText::new("Perfect").unwrap(),
        );
        assert!(matches!(
            store.insert_review(&review).await.unwrap(),
            InsertOutcome::Created(_)
        ));
        assert!(matches!(
            store
                .insert_wish(&NewWishlistEntry::new(author, game.id))
                .await
                .unwrap(),
            InsertOutcome::Created(_)
        ));

        assert!(store.delete_game(game.id).await.unwrap());
        assert!(store.list_reviews(None).await.unwrap().is_empty());
        assert!(store.list_wishlist(author).await.unwrap().is_empty());
        assert!(!store.delete_game(game.id).await.unwrap());
    }
}
