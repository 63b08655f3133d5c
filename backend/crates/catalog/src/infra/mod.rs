//! Infrastructure Layer
//!
//! Database implementations of the catalog repositories.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCatalogStore;
pub use postgres::PgCatalogRepository;
