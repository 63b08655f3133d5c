//! Repository Traits
//!
//! Persistence capabilities the access-control core needs: keyed point
//! lookups, keyed inserts with uniqueness enforcement, keyed update and
//! keyed delete.

use kernel::id::{AccountId, RoleId};

use crate::domain::entity::{Account, NewAccount, NewRole, Role};
use crate::domain::uniqueness::InsertOutcome;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert unless the email is taken
    async fn insert_account(&self, account: &NewAccount) -> AuthResult<InsertOutcome<Account>>;

    async fn find_account(&self, id: AccountId) -> AuthResult<Option<Account>>;

    async fn find_account_by_email(&self, email: &Email) -> AuthResult<Option<Account>>;

    /// Update the session mirror; `false` if the account does not exist
    async fn record_session(
        &self,
        id: AccountId,
        token: Option<&str>,
        active: bool,
    ) -> AuthResult<bool>;

    /// Persist name and password hash
    async fn update_account(&self, account: &Account) -> AuthResult<()>;

    /// `false` if nothing was deleted
    async fn delete_account(&self, id: AccountId) -> AuthResult<bool>;
}

/// Role repository trait
#[trait_variant::make(RoleRepository: Send)]
pub trait LocalRoleRepository {
    /// Insert unless the name is taken
    async fn insert_role(&self, role: &NewRole) -> AuthResult<InsertOutcome<Role>>;

    async fn find_role(&self, id: RoleId) -> AuthResult<Option<Role>>;

    async fn list_roles(&self) -> AuthResult<Vec<Role>>;

    /// `false` if nothing was deleted; `Conflict` if accounts still hold it
    async fn delete_role(&self, id: RoleId) -> AuthResult<bool>;
}
