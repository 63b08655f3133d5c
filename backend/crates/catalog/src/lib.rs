//! Catalog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Games, reviews, wishlist entries, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Access Model
//! - Every route requires a bearer token (see `auth::middleware`)
//! - Game writes require the Admin role
//! - Reviews and wishlist entries can only be changed by their owner
//! - One review and one wishlist entry per account and game, enforced by
//!   the store's unique constraints

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{CatalogError, CatalogResult};
pub use infra::memory::InMemoryCatalogStore;
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::catalog_router;
