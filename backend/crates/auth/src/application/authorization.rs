//! Authorization Engine
//!
//! Pure policy decisions over a [`Principal`]. The table mapping each
//! protected [`Action`] to its [`Requirement`] lives in
//! [`Action::requirement`]; use cases call [`authorize_action`] and never
//! compare roles or owner ids themselves.

use kernel::id::AccountId;

use crate::domain::entity::Principal;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthzError;

/// Proof that a check passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allow;

/// What a principal must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any authenticated principal
    Authenticated,
    /// Role at or above the given level
    RoleAtLeast(UserRole),
    /// The principal is the resource's owner
    OwnsResource(AccountId),
    /// The principal acts on its own account
    SelfOnly,
}

/// Protected operations of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateGame,
    UpdateGame,
    DeleteGame,
    ReadGames,
    CreateRole,
    DeleteRole,
    ListRoles,
    DeleteAccount,
    UpdateOwnAccount,
    Logout,
    CreateReview { author_id: AccountId },
    UpdateReview { author_id: AccountId },
    DeleteReview { author_id: AccountId },
    ReadReviews,
    CreateWish { owner_id: AccountId },
    DeleteWish { owner_id: AccountId },
    ReadOwnWishlist,
}

impl Action {
    /// Policy table
    pub const fn requirement(&self) -> Requirement {
        use Action::*;
        match *self {
            CreateGame | UpdateGame | DeleteGame => Requirement::RoleAtLeast(UserRole::Admin),
            CreateRole | DeleteRole | ListRoles => Requirement::RoleAtLeast(UserRole::Admin),
            DeleteAccount => Requirement::RoleAtLeast(UserRole::Admin),
            CreateReview { author_id }
            | UpdateReview { author_id }
            | DeleteReview { author_id } => Requirement::OwnsResource(author_id),
            CreateWish { owner_id } | DeleteWish { owner_id } => {
                Requirement::OwnsResource(owner_id)
            }
            UpdateOwnAccount | Logout => Requirement::SelfOnly,
            ReadGames | ReadReviews | ReadOwnWishlist => Requirement::Authenticated,
        }
    }
}

/// Decide whether `principal` satisfies `requirement`
pub fn authorize(principal: &Principal, requirement: Requirement) -> Result<Allow, AuthzError> {
    match requirement {
        Requirement::Authenticated | Requirement::SelfOnly => Ok(Allow),
        Requirement::RoleAtLeast(role) if principal.role >= role => Ok(Allow),
        Requirement::RoleAtLeast(_) => Err(AuthzError::InsufficientRole),
        Requirement::OwnsResource(owner_id) if principal.subject_id == owner_id => Ok(Allow),
        Requirement::OwnsResource(_) => Err(AuthzError::NotOwner),
    }
}

/// Look up `action` in the policy table and decide
pub fn authorize_action(principal: &Principal, action: Action) -> Result<Allow, AuthzError> {
    let decision = authorize(principal, action.requirement());
    if let Err(reason) = &decision {
        tracing::debug!(
            subject_id = %principal.subject_id,
            role = %principal.role,
            action = ?action,
            reason = %reason,
            "Authorization denied"
        );
    }
    decision
}
