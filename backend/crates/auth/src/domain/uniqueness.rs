//! Uniqueness keys
//!
//! Every uniquely-constrained insert names the key it claims. Stores report
//! a collision through [`InsertOutcome::Duplicate`] from the insert itself,
//! never from a separate lookup.

use derive_more::Display;
use kernel::id::{AccountId, GameId};

use crate::domain::value_object::{email::Email, role_name::RoleName};

/// A key at most one stored record may hold
///
/// `Display` is the client-facing conflict message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum UniquenessKey {
    #[display("Email is already registered")]
    AccountEmail(Email),

    #[display("Role already exist")]
    RoleName(RoleName),

    #[display("You can only make one review per game")]
    ReviewPerGame { author_id: AccountId, game_id: GameId },

    #[display("Game is already in your wishlist")]
    WishPerGame { owner_id: AccountId, game_id: GameId },
}

impl UniquenessKey {
    /// Constraint label used in logs
    pub fn constraint(&self) -> &'static str {
        match self {
            UniquenessKey::AccountEmail(_) => "users_email_key",
            UniquenessKey::RoleName(_) => "roles_role_name_key",
            UniquenessKey::ReviewPerGame { .. } => "reviews_user_game_key",
            UniquenessKey::WishPerGame { .. } => "wishlists_user_game_key",
        }
    }
}

/// What a store observed when inserting under a uniqueness constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<T> {
    Created(T),
    Duplicate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_messages() {
        let key = UniquenessKey::ReviewPerGame {
            author_id: AccountId::new(5),
            game_id: GameId::new(9),
        };
        assert_eq!(key.to_string(), "You can only make one review per game");
        assert_eq!(key.constraint(), "reviews_user_game_key");

        let key = UniquenessKey::RoleName(RoleName::new("Moderator").unwrap());
        assert_eq!(key.to_string(), "Role already exist");
    }
}
