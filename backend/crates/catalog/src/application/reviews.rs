//! Review Use Cases
//!
//! One review per author and game. Only the author may revise or remove
//! a review.

use std::sync::Arc;

use auth::Principal;
use auth::guard::{UniquenessKey, guarded_insert};
use auth::policy::{Action, authorize_action};
use kernel::id::{GameId, ReviewId};

use crate::domain::entities::{NewReview, Review};
use crate::domain::repository::{GameRepository, ReviewRepository};
use crate::domain::value_objects::{Rating, ReviewText};
use crate::error::{CatalogError, CatalogResult};

/// Raw review fields as received
pub struct ReviewInput {
    pub rating: i64,
    pub description: String,
}

impl ReviewInput {
    fn validate(self) -> CatalogResult<(Rating, ReviewText)> {
        Ok((Rating::new(self.rating)?, ReviewText::new(self.description)?))
    }
}

/// Review use case
pub struct ReviewUseCase<S>
where
    S: GameRepository + ReviewRepository,
{
    store: Arc<S>,
}

impl<S> ReviewUseCase<S>
where
    S: GameRepository + ReviewRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        principal: &Principal,
        game_id: GameId,
        input: ReviewInput,
    ) -> CatalogResult<Review> {
        let author_id = principal.subject_id;
        authorize_action(principal, Action::CreateReview { author_id })?;
        let (rating, description) = input.validate()?;

        if self.store.find_game(game_id).await?.is_none() {
            return Err(CatalogError::GameNotFound);
        }

        let new_review = NewReview::new(author_id, game_id, rating, description);
        let review = guarded_insert(UniquenessKey::ReviewPerGame { author_id, game_id }, || {
            self.store.insert_review(&new_review)
        })
        .await?
        .into_result()?;

        tracing::info!(
            review_id = %review.id,
            game_id = %game_id,
            author_id = %author_id,
            "Review created"
        );
        Ok(review)
    }

    pub async fn list(
        &self,
        principal: &Principal,
        game_id: Option<GameId>,
    ) -> CatalogResult<Vec<Review>> {
        authorize_action(principal, Action::ReadReviews)?;
        self.store.list_reviews(game_id).await
    }

    pub async fn update(
        &self,
        principal: &Principal,
        review_id: ReviewId,
        input: ReviewInput,
    ) -> CatalogResult<Review> {
        let (rating, description) = input.validate()?;

        let mut review = self.load(review_id).await?;
        authorize_action(
            principal,
            Action::UpdateReview {
                author_id: review.author_id,
            },
        )?;

        review.revise(rating, description);
        self.store.update_review(&review).await?;

        tracing::info!(review_id = %review.id, "Review updated");
        Ok(review)
    }

    pub async fn delete(&self, principal: &Principal, review_id: ReviewId) -> CatalogResult<()> {
        let review = self.load(review_id).await?;
        authorize_action(
            principal,
            Action::DeleteReview {
                author_id: review.author_id,
            },
        )?;

        if !self.store.delete_review(review_id).await? {
            return Err(CatalogError::ReviewNotFound);
        }

        tracing::info!(review_id = %review_id, "Review deleted");
        Ok(())
    }

    async fn load(&self, review_id: ReviewId) -> CatalogResult<Review> {
        self.store
            .find_review(review_id)
            .await?
            .ok_or(CatalogError::ReviewNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::games::{GameInput, GameUseCase};
    use crate::infra::memory::InMemoryCatalogStore;
    use auth::{AuthError, AuthzError, UserRole};
    use kernel::id::AccountId;

    async fn store_with_game() -> (Arc<InMemoryCatalogStore>, GameId) {
        let store = Arc::new(InMemoryCatalogStore::new());
        let admin = Principal::new(AccountId::new(1), UserRole::Admin);
        let game = GameUseCase::new(store.clone())
            .create(
                &admin,
                GameInput {
                    title: "Hades".to_string(),
                    developer: "Supergiant".to_string(),
                    release_date: "2020-09-17".to_string(),
                    description: "Roguelike".to_string(),
                },
            )
            .await
            .unwrap();
        (store, game.id)
    }

    fn review(rating: i64, text: &str) -> ReviewInput {
        ReviewInput {
            rating,
            description: text.to_string(),
        }
    }

    fn user(id: i64) -> Principal {
        Principal::new(AccountId::new(id), UserRole::Regular)
    }

    #[tokio::test]
    async fn test_author_revises_and_removes_review() {
        let (store, game_id) = store_with_game().await;
        let reviews = ReviewUseCase::new(store);

        let created = reviews
            .create(&user(5), game_id, review(8, "Great"))
            .await
            .unwrap();
        assert_eq!(created.author_id, AccountId::new(5));
        assert_eq!(created.rating.value(), 8);

        let revised = reviews
            .update(&user(5), created.id, review(9, "Even better"))
            .await
            .unwrap();
        assert_eq!(revised.rating.value(), 9);
        assert_eq!(revised.description.as_str(), "Even better");

        let listed = reviews.list(&user(6), Some(game_id)).await.unwrap();
        assert_eq!(listed, vec![revised]);

        reviews.delete(&user(5), created.id).await.unwrap();
        assert!(matches!(
            reviews.delete(&user(5), created.id).await,
            Err(CatalogError::ReviewNotFound)
        ));
    }

    #[tokio::test]
    async fn test_other_users_cannot_touch_review() {
        let (store, game_id) = store_with_game().await;
        let reviews = ReviewUseCase::new(store);
        let created = reviews
            .create(&user(5), game_id, review(8, "Great"))
            .await
            .unwrap();

        assert!(matches!(
            reviews.update(&user(6), created.id, review(1, "Mine now")).await,
            Err(CatalogError::Access(AuthError::Forbidden(AuthzError::NotOwner)))
        ));

        // Ownership is checked even for administrators
        let admin = Principal::new(AccountId::new(1), UserRole::Admin);
        assert!(matches!(
            reviews.delete(&admin, created.id).await,
            Err(CatalogError::Access(AuthError::Forbidden(AuthzError::NotOwner)))
        ));
    }

    #[tokio::test]
    async fn test_review_for_missing_game() {
        let (store, _) = store_with_game().await;
        let reviews = ReviewUseCase::new(store);
        assert!(matches!(
            reviews.create(&user(5), GameId::new(404), review(5, "Hm")).await,
            Err(CatalogError::GameNotFound)
        ));
    }
}
