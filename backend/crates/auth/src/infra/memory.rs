//! In-memory repository
//!
//! Backs tests and local experiments. Each insert probes its uniqueness
//! key and writes under one lock, which gives the same single-winner
//! behavior as the database's unique indexes.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, RoleId};
use tokio::sync::Mutex;

use crate::domain::entity::{Account, NewAccount, NewRole, Role};
use crate::domain::repository::{AccountRepository, RoleRepository};
use crate::domain::uniqueness::InsertOutcome;
use crate::domain::value_object::{email::Email, role_name::RoleName, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct AuthTables {
    accounts: BTreeMap<AccountId, Account>,
    roles: BTreeMap<RoleId, Role>,
    last_account_id: i64,
    last_role_id: i64,
}

/// Shared in-memory account and role tables
#[derive(Clone)]
pub struct InMemoryAuthStore {
    tables: Arc<Mutex<AuthTables>>,
}

impl Default for InMemoryAuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuthStore {
    /// Empty store with the built-in roles seeded
    pub fn new() -> Self {
        let now = Utc::now();
        let mut tables = AuthTables::default();
        for role in [UserRole::Regular, UserRole::Admin] {
            tables.roles.insert(role.role_id(), seeded_role(role, now));
            tables.last_role_id = tables.last_role_id.max(role.role_id().value());
        }
        Self {
            tables: Arc::new(Mutex::new(tables)),
        }
    }
}

fn seeded_role(role: UserRole, now: DateTime<Utc>) -> Role {
    let name = match role {
        UserRole::Regular => "Regular",
        UserRole::Admin => "Admin",
    };
    Role {
        id: role.role_id(),
        name: RoleName::from_db(name),
        created_at: now,
        updated_at: now,
    }
}

impl AccountRepository for InMemoryAuthStore {
    async fn insert_account(&self, account: &NewAccount) -> AuthResult<InsertOutcome<Account>> {
        let mut tables = self.tables.lock().await;
        if tables.accounts.values().any(|a| a.email == account.email) {
            return Ok(InsertOutcome::Duplicate);
        }
        if !tables.roles.contains_key(&account.role_id) {
            return Err(AuthError::Internal(format!(
                "Unknown role id {}",
                account.role_id
            )));
        }

        tables.last_account_id += 1;
        let id = AccountId::new(tables.last_account_id);
        let created = account.clone().into_account(id);
        tables.accounts.insert(id, created.clone());
        Ok(InsertOutcome::Created(created))
    }

    async fn find_account(&self, id: AccountId) -> AuthResult<Option<Account>> {
        Ok(self.tables.lock().await.accounts.get(&id).cloned())
    }

    async fn find_account_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let tables = self.tables.lock().await;
        Ok(tables.accounts.values().find(|a| &a.email == email).cloned())
    }

    async fn record_session(
        &self,
        id: AccountId,
        token: Option<&str>,
        active: bool,
    ) -> AuthResult<bool> {
        let mut tables = self.tables.lock().await;
        let Some(account) = tables.accounts.get_mut(&id) else {
            return Ok(false);
        };
        account.current_token = token.map(str::to_owned);
        account.active = active;
        account.updated_at = Utc::now();
        Ok(true)
    }

    async fn update_account(&self, account: &Account) -> AuthResult<()> {
        let mut tables = self.tables.lock().await;
        let stored = tables
            .accounts
            .get_mut(&account.id)
            .ok_or(AuthError::NotFound("Account"))?;
        stored.name = account.name.clone();
        stored.password_hash = account.password_hash.clone();
        stored.updated_at = account.updated_at;
        Ok(())
    }

    async fn delete_account(&self, id: AccountId) -> AuthResult<bool> {
        Ok(self.tables.lock().await.accounts.remove(&id).is_some())
    }
}

impl RoleRepository for InMemoryAuthStore {
    async fn insert_role(&self, role: &NewRole) -> AuthResult<InsertOutcome<Role>> {
        let mut tables = self.tables.lock().await;
        if tables.roles.values().any(|r| r.name == role.name) {
            return Ok(InsertOutcome::Duplicate);
        }

        tables.last_role_id += 1;
        let id = RoleId::new(tables.last_role_id);
        let created = role.clone().into_role(id);
        tables.roles.insert(id, created.clone());
        Ok(InsertOutcome::Created(created))
    }

    async fn find_role(&self, id: RoleId) -> AuthResult<Option<Role>> {
        Ok(self.tables.lock().await.roles.get(&id).cloned())
    }

    async fn list_roles(&self) -> AuthResult<Vec<Role>> {
        Ok(self.tables.lock().await.roles.values().cloned().collect())
    }

    async fn delete_role(&self, id: RoleId) -> AuthResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.accounts.values().any(|a| a.role_id == id) {
            return Err(AuthError::Conflict(
                "Role is still assigned to accounts".to_string(),
            ));
        }
        Ok(tables.roles.remove(&id).is_some())
    }
}
