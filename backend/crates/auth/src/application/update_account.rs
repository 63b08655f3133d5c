//! Update Account Use Case
//!
//! Lets a principal change its own name and password. The email is the
//! login identity and cannot be changed here.

use std::sync::Arc;

use crate::application::authorization::{Action, authorize_action};
use crate::application::config::AuthConfig;
use crate::domain::entity::{Account, Principal};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_name::AccountName,
    account_password::{AccountPassword, RawPassword},
};
use crate::error::{AuthError, AuthResult};

/// Fields to change; at least one is required
#[derive(Default)]
pub struct UpdateAccountInput {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Update account use case
pub struct UpdateAccountUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A> UpdateAccountUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        principal: &Principal,
        input: UpdateAccountInput,
    ) -> AuthResult<Account> {
        authorize_action(principal, Action::UpdateOwnAccount)?;

        if input.name.is_none() && input.password.is_none() {
            return Err(AuthError::validation("Nothing to update"));
        }
        let name = input.name.map(AccountName::new).transpose()?;
        let raw_password = input.password.map(RawPassword::new).transpose()?;

        let mut account = self
            .account_repo
            .find_account(principal.subject_id)
            .await?
            .ok_or(AuthError::NotFound("Account"))?;

        if let Some(name) = name {
            account.rename(name);
        }
        if let Some(raw_password) = raw_password {
            account.set_password(AccountPassword::from_raw(
                &raw_password,
                self.config.pepper(),
            )?);
        }

        self.account_repo.update_account(&account).await?;

        tracing::info!(account_id = %account.id, "Account updated");
        Ok(account)
    }
}
