//! PostgreSQL Repository Implementations

use auth::AuthError;
use auth::guard::InsertOutcome;
use auth::infra::postgres::unique_outcome;
use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{AccountId, GameId, ReviewId, WishlistEntryId};
use sqlx::PgPool;

use crate::domain::entities::{
    Game, NewReview, NewWishlistEntry, Review, WishlistEntry, WishlistItem,
};
use crate::domain::repository::{GameRepository, ReviewRepository, WishlistRepository};
use crate::domain::value_objects::{GameDraft, Rating, ReviewText};
use crate::error::{CatalogError, CatalogResult};

/// PostgreSQL-backed catalog repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map foreign-key violations on insert to the row that went missing
fn insert_outcome<T>(result: Result<T, sqlx::Error>) -> CatalogResult<InsertOutcome<T>> {
    match result {
        Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
            if db.constraint().is_some_and(|c| c.contains("game_id")) {
                Err(CatalogError::GameNotFound)
            } else {
                Err(AuthError::NotFound("Account").into())
            }
        }
        other => unique_outcome(other),
    }
}

// ============================================================================
// Game Repository Implementation
// ============================================================================

impl GameRepository for PgCatalogRepository {
    async fn insert_game(&self, draft: &GameDraft) -> CatalogResult<Game> {
        let row = sqlx::query_as::<_, GameRow>(
            r#"
            INSERT INTO games (title, developer, release_date, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING game_id, title, developer, release_date, description, created_at, updated_at
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.developer)
        .bind(draft.release_date)
        .bind(&draft.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_game())
    }

    async fn find_game(&self, id: GameId) -> CatalogResult<Option<Game>> {
        let row = sqlx::query_as::<_, GameRow>(
            r#"
            SELECT game_id, title, developer, release_date, description, created_at, updated_at
            FROM games
            WHERE game_id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GameRow::into_game))
    }

    async fn list_games(&self) -> CatalogResult<Vec<Game>> {
        let rows = sqlx::query_as::<_, GameRow>(
            r#"
            SELECT game_id, title, developer, release_date, description, created_at, updated_at
            FROM games
            ORDER BY game_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GameRow::into_game).collect())
    }

    async fn update_game(&self, id: GameId, draft: &GameDraft) -> CatalogResult<Option<Game>> {
        let row = sqlx::query_as::<_, GameRow>(
            r#"
            UPDATE games SET
                title = $2,
                developer = $3,
                release_date = $4,
                description = $5,
                updated_at = NOW()
            WHERE game_id = $1
            RETURNING game_id, title, developer, release_date, description, created_at, updated_at
            "#,
        )
        .bind(id.value())
        .bind(&draft.title)
        .bind(&draft.developer)
        .bind(draft.release_date)
        .bind(&draft.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GameRow::into_game))
    }

    async fn delete_game(&self, id: GameId) -> CatalogResult<bool> {
        let deleted = sqlx::query("DELETE FROM games WHERE game_id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Review Repository Implementation
// ============================================================================

impl ReviewRepository for PgCatalogRepository {
    async fn insert_review(&self, review: &NewReview) -> CatalogResult<InsertOutcome<Review>> {
        let result = sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO reviews (user_id, game_id, rating, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING review_id, user_id, game_id, rating, description, created_at, updated_at
            "#,
        )
        .bind(review.author_id.value())
        .bind(review.game_id.value())
        .bind(review.rating.value() as i16)
        .bind(review.description.as_str())
        .bind(review.created_at)
        .fetch_one(&self.pool)
        .await;

        Ok(match insert_outcome(result)? {
            InsertOutcome::Created(row) => InsertOutcome::Created(row.into_review()?),
            InsertOutcome::Duplicate => InsertOutcome::Duplicate,
        })
    }

    async fn find_review(&self, id: ReviewId) -> CatalogResult<Option<Review>> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT review_id, user_id, game_id, rating, description, created_at, updated_at
            FROM reviews
            WHERE review_id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ReviewRow::into_review).transpose()
    }

    async fn list_reviews(&self, game_id: Option<GameId>) -> CatalogResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT review_id, user_id, game_id, rating, description, created_at, updated_at
            FROM reviews
            WHERE $1::BIGINT IS NULL OR game_id = $1
            ORDER BY review_id
            "#,
        )
        .bind(game_id.map(|g| g.value()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReviewRow::into_review).collect()
    }

    async fn update_review(&self, review: &Review) -> CatalogResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE reviews SET
                rating = $2,
                description = $3,
                updated_at = $4
            WHERE review_id = $1
            "#,
        )
        .bind(review.id.value())
        .bind(review.rating.value() as i16)
        .bind(review.description.as_str())
        .bind(review.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(CatalogError::ReviewNotFound);
        }
        Ok(())
    }

    async fn delete_review(&self, id: ReviewId) -> CatalogResult<bool> {
        let deleted = sqlx::query("DELETE FROM reviews WHERE review_id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Wishlist Repository Implementation
// ============================================================================

impl WishlistRepository for PgCatalogRepository {
    async fn insert_wish(
        &self,
        entry: &NewWishlistEntry,
    ) -> CatalogResult<InsertOutcome<WishlistEntry>> {
        let result = sqlx::query_as::<_, WishRow>(
            r#"
            INSERT INTO wishlists (user_id, game_id, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING wishlist_id, user_id, game_id, created_at, updated_at
            "#,
        )
        .bind(entry.owner_id.value())
        .bind(entry.game_id.value())
        .bind(entry.created_at)
        .fetch_one(&self.pool)
        .await;

        Ok(match insert_outcome(result)? {
            InsertOutcome::Created(row) => InsertOutcome::Created(row.into_entry()),
            InsertOutcome::Duplicate => InsertOutcome::Duplicate,
        })
    }

    async fn find_wish(&self, id: WishlistEntryId) -> CatalogResult<Option<WishlistEntry>> {
        let row = sqlx::query_as::<_, WishRow>(
            r#"
            SELECT wishlist_id, user_id, game_id, created_at, updated_at
            FROM wishlists
            WHERE wishlist_id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(WishRow::into_entry))
    }

    async fn list_wishlist(&self, owner_id: AccountId) -> CatalogResult<Vec<WishlistItem>> {
        let rows = sqlx::query_as::<_, WishlistItemRow>(
            r#"
            SELECT
                w.wishlist_id,
                w.user_id,
                w.game_id,
                w.created_at,
                w.updated_at,
                g.title AS game_title
            FROM wishlists w
            JOIN games g ON g.game_id = w.game_id
            WHERE w.user_id = $1
            ORDER BY w.wishlist_id
            "#,
        )
        .bind(owner_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WishlistItemRow::into_item).collect())
    }

    async fn delete_wish(&self, id: WishlistEntryId) -> CatalogResult<bool> {
        let deleted = sqlx::query("DELETE FROM wishlists WHERE wishlist_id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct GameRow {
    game_id: i64,
    title: String,
    developer: String,
    release_date: NaiveDate,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GameRow {
    fn into_game(self) -> Game {
        Game {
            id: GameId::new(self.game_id),
            title: self.title,
            developer: self.developer,
            release_date: self.release_date,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    review_id: i64,
    user_id: i64,
    game_id: i64,
    rating: i16,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ReviewRow {
    fn into_review(self) -> CatalogResult<Review> {
        let rating = Rating::from_db(self.rating)?;

        Ok(Review {
            id: ReviewId::new(self.review_id),
            author_id: AccountId::new(self.user_id),
            game_id: GameId::new(self.game_id),
            rating,
            description: ReviewText::from_db(self.description),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct WishRow {
    wishlist_id: i64,
    user_id: i64,
    game_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WishRow {
    fn into_entry(self) -> WishlistEntry {
        WishlistEntry {
            id: WishlistEntryId::new(self.wishlist_id),
            owner_id: AccountId::new(self.user_id),
            game_id: GameId::new(self.game_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct WishlistItemRow {
    #[sqlx(flatten)]
    entry: WishRow,
    game_title: String,
}

impl WishlistItemRow {
    fn into_item(self) -> WishlistItem {
        WishlistItem {
            entry: self.entry.into_entry(),
            game_title: self.game_title,
        }
    }
}
