//! Application Layer
//!
//! Use cases for games, reviews and wishlists.

pub mod games;
pub mod reviews;
pub mod wishlist;

// Re-exports
pub use games::{GameInput, GameUseCase};
pub use reviews::{ReviewInput, ReviewUseCase};
pub use wishlist::WishlistUseCase;
