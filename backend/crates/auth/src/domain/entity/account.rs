//! Account Entity

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, RoleId};

use crate::domain::value_object::{
    account_name::AccountName, account_password::AccountPassword, email::Email,
    user_role::UserRole,
};

/// Registered account
///
/// `current_token` and `active` mirror the last login/logout. They are
/// informational only; bearer tokens are validated by signature and expiry.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: Email,
    pub name: AccountName,
    pub password_hash: AccountPassword,
    pub role_id: RoleId,
    pub current_token: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Privilege level embedded in tokens issued to this account
    pub fn role(&self) -> UserRole {
        UserRole::for_role_id(self.role_id)
    }

    pub fn is_logged_in(&self) -> bool {
        self.active && self.current_token.is_some()
    }

    pub fn rename(&mut self, name: AccountName) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    pub fn set_password(&mut self, password_hash: AccountPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}

/// Account about to be inserted; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: Email,
    pub name: AccountName,
    pub password_hash: AccountPassword,
    pub role_id: RoleId,
    pub created_at: DateTime<Utc>,
}

impl NewAccount {
    /// Fresh self-registered account: regular role, logged out
    pub fn register(email: Email, name: AccountName, password_hash: AccountPassword) -> Self {
        Self {
            email,
            name,
            password_hash,
            role_id: UserRole::Regular.role_id(),
            created_at: Utc::now(),
        }
    }

    pub fn into_account(self, id: AccountId) -> Account {
        Account {
            id,
            email: self.email,
            name: self.name,
            password_hash: self.password_hash,
            role_id: self.role_id,
            current_token: None,
            active: false,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
