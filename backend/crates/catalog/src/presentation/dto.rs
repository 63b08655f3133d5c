//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Game, Review, WishlistEntry, WishlistItem};
use crate::domain::value_objects::RELEASE_DATE_FORMAT;

// ============================================================================
// Games
// ============================================================================

/// Game create/update request
#[derive(Debug, Clone, Deserialize)]
pub struct GameRequest {
    pub title: String,
    pub developer: String,
    /// `YYYY-MM-DD`
    pub release_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub id: i64,
    pub title: String,
    pub developer: String,
    pub release_date: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Game> for GameView {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id.value(),
            title: game.title.clone(),
            developer: game.developer.clone(),
            release_date: game.release_date.format(RELEASE_DATE_FORMAT).to_string(),
            description: game.description.clone(),
            created_at: game.created_at,
            updated_at: game.updated_at,
        }
    }
}

// ============================================================================
// Reviews
// ============================================================================

/// Review create request
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub game_id: i64,
    pub rating: i64,
    pub description: String,
}

/// Review update request
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewUpdateRequest {
    pub rating: i64,
    pub description: String,
}

/// Review list filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewQuery {
    pub game_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewView {
    pub id: i64,
    pub user_id: i64,
    pub game_id: i64,
    pub rating: u8,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.value(),
            user_id: review.author_id.value(),
            game_id: review.game_id.value(),
            rating: review.rating.value(),
            description: review.description.as_str().to_string(),
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

// ============================================================================
// Wishlist
// ============================================================================

/// Wishlist add request
#[derive(Debug, Clone, Deserialize)]
pub struct WishRequest {
    pub game_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WishView {
    pub id: i64,
    pub user_id: i64,
    pub game_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&WishlistEntry> for WishView {
    fn from(entry: &WishlistEntry) -> Self {
        Self {
            id: entry.id.value(),
            user_id: entry.owner_id.value(),
            game_id: entry.game_id.value(),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// Wishlist entry with the game's title
#[derive(Debug, Clone, Serialize)]
pub struct WishlistItemView {
    pub id: i64,
    pub game_id: i64,
    pub game_title: String,
    pub created_at: DateTime<Utc>,
}

impl From<&WishlistItem> for WishlistItemView {
    fn from(item: &WishlistItem) -> Self {
        Self {
            id: item.entry.id.value(),
            game_id: item.entry.game_id.value(),
            game_title: item.game_title.clone(),
            created_at: item.entry.created_at,
        }
    }
}
