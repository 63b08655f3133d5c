//! Wishlist Use Cases
//!
//! Each principal keeps a private list of games it wants.

use std::sync::Arc;

use auth::Principal;
use auth::guard::{UniquenessKey, guarded_insert};
use auth::policy::{Action, authorize_action};
use kernel::id::{GameId, WishlistEntryId};

use crate::domain::entities::{NewWishlistEntry, WishlistEntry, WishlistItem};
use crate::domain::repository::{GameRepository, WishlistRepository};
use crate::error::{CatalogError, CatalogResult};

/// Wishlist use case
pub struct WishlistUseCase<S>
where
    S: GameRepository + WishlistRepository,
{
    store: Arc<S>,
}

impl<S> WishlistUseCase<S>
where
    S: GameRepository + WishlistRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn add(&self, principal: &Principal, game_id: i64) -> CatalogResult<WishlistEntry> {
        let owner_id = principal.subject_id;
        authorize_action(principal, Action::CreateWish { owner_id })?;

        if game_id <= 0 {
            return Err(CatalogError::validation("Invalid game ID"));
        }
        let game_id = GameId::new(game_id);
        if self.store.find_game(game_id).await?.is_none() {
            return Err(CatalogError::GameNotFound);
        }

        let new_entry = NewWishlistEntry::new(owner_id, game_id);
        let entry = guarded_insert(UniquenessKey::WishPerGame { owner_id, game_id }, || {
            self.store.insert_wish(&new_entry)
        })
        .await?
        .into_result()?;

        tracing::info!(entry_id = %entry.id, game_id = %game_id, owner_id = %owner_id, "Wish added");
        Ok(entry)
    }

    pub async fn list_own(&self, principal: &Principal) -> CatalogResult<Vec<WishlistItem>> {
        authorize_action(principal, Action::ReadOwnWishlist)?;
        self.store.list_wishlist(principal.subject_id).await
    }

    pub async fn remove(
        &self,
        principal: &Principal,
        entry_id: WishlistEntryId,
    ) -> CatalogResult<()> {
        let entry = self
            .store
            .find_wish(entry_id)
            .await?
            .ok_or(CatalogError::WishNotFound)?;
        authorize_action(
            principal,
            Action::DeleteWish {
                owner_id: entry.owner_id,
            },
        )?;

        if !self.store.delete_wish(entry_id).await? {
            return Err(CatalogError::WishNotFound);
        }

        tracing::info!(entry_id = %entry_id, "Wish removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::games::{GameInput, GameUseCase};
    use crate::infra::memory::InMemoryCatalogStore;
    use auth::{AuthError, UserRole};
    use kernel::id::AccountId;

    fn user(id: i64) -> Principal {
        Principal::new(AccountId::new(id), UserRole::Regular)
    }

    async fn store_with_game(title: &str) -> (Arc<InMemoryCatalogStore>, GameId) {
        let store = Arc::new(InMemoryCatalogStore::new());
        let admin = Principal::new(AccountId::new(1), UserRole::Admin);
        let game = GameUseCase::new(store.clone())
            .create(
                &admin,
                GameInput {
                    title: title.to_string(),
                    developer: "Team Cherry".to_string(),
                    release_date: "2017-02-24".to_string(),
                    description: "Metroidvania".to_string(),
                },
            )
            .await
            .unwrap();
        (store, game.id)
    }

    #[tokio::test]
    async fn test_add_list_remove() {
        let (store, game_id) = store_with_game("Hollow Knight").await;
        let wishlist = WishlistUseCase::new(store);

        let entry = wishlist.add(&user(5), game_id.value()).await.unwrap();
        assert_eq!(entry.owner_id, AccountId::new(5));

        let items = wishlist.list_own(&user(5)).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].game_title, "Hollow Knight");
        assert!(wishlist.list_own(&user(6)).await.unwrap().is_empty());

        wishlist.remove(&user(5), entry.id).await.unwrap();
        assert!(wishlist.list_own(&user(5)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_wish_conflicts() {
        let (store, game_id) = store_with_game("Hollow Knight").await;
        let wishlist = WishlistUseCase::new(store);

        wishlist.add(&user(5), game_id.value()).await.unwrap();
        assert!(matches!(
            wishlist.add(&user(5), game_id.value()).await,
            Err(CatalogError::Access(AuthError::Conflict(msg)))
                if msg == "Game is already in your wishlist"
        ));
        // Another owner may wish for the same game
        wishlist.add(&user(6), game_id.value()).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_or_missing_game() {
        let (store, _) = store_with_game("Hollow Knight").await;
        let wishlist = WishlistUseCase::new(store);

        assert!(matches!(
            wishlist.add(&user(5), 0).await,
            Err(CatalogError::Validation(msg)) if msg == "Invalid game ID"
        ));
        assert!(matches!(
            wishlist.add(&user(5), 404).await,
            Err(CatalogError::GameNotFound)
        ));
        assert!(matches!(
            wishlist.remove(&user(5), WishlistEntryId::new(404)).await,
            Err(CatalogError::WishNotFound)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_yield_one_entry() {
        const N: usize = 12;
        let (store, game_id) = store_with_game("Hollow Knight").await;

        let mut handles = Vec::with_capacity(N);
        for _ in 0..N {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                WishlistUseCase::new(store).add(&user(5), game_id.value()).await
            }));
        }

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(CatalogError::Access(AuthError::Conflict(_))) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(conflicts, N - 1);
        assert_eq!(store.list_wishlist(AccountId::new(5)).await.unwrap().len(), 1);
    }
}
