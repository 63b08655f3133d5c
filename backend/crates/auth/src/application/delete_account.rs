//! Delete Account Use Case (administrators only)

use std::sync::Arc;

use kernel::id::AccountId;

use crate::application::authorization::{Action, authorize_action};
use crate::domain::entity::Principal;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};

/// Delete account use case
pub struct DeleteAccountUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
}

impl<A> DeleteAccountUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>) -> Self {
        Self { account_repo }
    }

    pub async fn execute(&self, principal: &Principal, account_id: AccountId) -> AuthResult<()> {
        authorize_action(principal, Action::DeleteAccount)?;

        if !self.account_repo.delete_account(account_id).await? {
            return Err(AuthError::NotFound("Account"));
        }

        tracing::info!(
            account_id = %account_id,
            deleted_by = %principal.subject_id,
            "Account deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::application::register::{RegisterInput, RegisterUseCase};
    use crate::domain::value_object::user_role::UserRole;
    use crate::error::AuthzError;
    use crate::infra::memory::InMemoryAuthStore;

    #[tokio::test]
    async fn test_only_admin_deletes_accounts() {
        let store = Arc::new(InMemoryAuthStore::new());
        let account = RegisterUseCase::new(store.clone(), Arc::new(AuthConfig::development()))
            .execute(RegisterInput {
                email: "ann@x.com".to_string(),
                name: "Ann".to_string(),
                password: "longenough1".to_string(),
            })
            .await
            .unwrap();
        let use_case = DeleteAccountUseCase::new(store.clone());

        let self_principal = Principal::new(account.id, UserRole::Regular);
        assert!(matches!(
            use_case.execute(&self_principal, account.id).await,
            Err(AuthError::Forbidden(AuthzError::InsufficientRole))
        ));

        let admin = Principal::new(AccountId::new(999), UserRole::Admin);
        use_case.execute(&admin, account.id).await.unwrap();
        assert!(store.find_account(account.id).await.unwrap().is_none());

        assert!(matches!(
            use_case.execute(&admin, account.id).await,
            Err(AuthError::NotFound("Account"))
        ));
    }
}
