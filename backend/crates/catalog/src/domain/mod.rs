//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Game, Review, WishlistEntry)
//! - Domain value objects (GameDraft, Rating, ReviewText)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
