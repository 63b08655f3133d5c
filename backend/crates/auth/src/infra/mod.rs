//! Infrastructure Layer
//!
//! Database implementations of the repository traits.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryAuthStore;
pub use postgres::{PgAuthRepository, unique_outcome};
