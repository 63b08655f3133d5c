//! Domain Entities
//!
//! Core business entities for the catalog domain.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{AccountId, GameId, ReviewId, WishlistEntryId};

use crate::domain::value_objects::{GameDraft, Rating, ReviewText};

/// Game entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub developer: String,
    pub release_date: NaiveDate,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    pub fn from_draft(id: GameId, draft: GameDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            developer: draft.developer,
            release_date: draft.release_date,
            description: draft.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field
    pub fn apply(&mut self, draft: GameDraft) {
        self.title = draft.title;
        self.developer = draft.developer;
        self.release_date = draft.release_date;
        self.description = draft.description;
        self.updated_at = Utc::now();
    }
}

/// Review entity - at most one per (author, game)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub author_id: AccountId,
    pub game_id: GameId,
    pub rating: Rating,
    pub description: ReviewText,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn revise(&mut self, rating: Rating, description: ReviewText) {
        self.rating = rating;
        self.description = description;
        self.updated_at = Utc::now();
    }
}

/// Review about to be inserted
#[derive(Debug, Clone)]
pub struct NewReview {
    pub author_id: AccountId,
    pub game_id: GameId,
    pub rating: Rating,
    pub description: ReviewText,
    pub created_at: DateTime<Utc>,
}

impl NewReview {
    pub fn new(author_id: AccountId, game_id: GameId, rating: Rating, description: ReviewText) -> Self {
        Self {
            author_id,
            game_id,
            rating,
            description,
            created_at: Utc::now(),
        }
    }

    pub fn into_review(self, id: ReviewId) -> Review {
        Review {
            id,
            author_id: self.author_id,
            game_id: self.game_id,
            rating: self.rating,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Wishlist entry - at most one per (owner, game)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistEntry {
    pub id: WishlistEntryId,
    pub owner_id: AccountId,
    pub game_id: GameId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wishlist entry about to be inserted
#[derive(Debug, Clone)]
pub struct NewWishlistEntry {
    pub owner_id: AccountId,
    pub game_id: GameId,
    pub created_at: DateTime<Utc>,
}

impl NewWishlistEntry {
    pub fn new(owner_id: AccountId, game_id: GameId) -> Self {
        Self {
            owner_id,
            game_id,
            created_at: Utc::now(),
        }
    }

    pub fn into_entry(self, id: WishlistEntryId) -> WishlistEntry {
        WishlistEntry {
            id,
            owner_id: self.owner_id,
            game_id: self.game_id,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Wishlist read model: an entry with its game's title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistItem {
    pub entry: WishlistEntry,
    pub game_title: String,
}
