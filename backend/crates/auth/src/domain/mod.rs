//! Domain Layer
//!
//! Contains entities, value objects, uniqueness keys and repository traits.

pub mod entity;
pub mod repository;
pub mod uniqueness;
pub mod value_object;

// Re-exports
pub use entity::{Account, NewAccount, NewRole, Principal, Role};
pub use repository::{AccountRepository, RoleRepository};
pub use uniqueness::{InsertOutcome, UniquenessKey};
