//! Logout Use Case
//!
//! Clears the account's session mirror. The bearer token itself is not
//! revoked and keeps verifying until it expires.

use std::sync::Arc;

use crate::application::authorization::{Action, authorize_action};
use crate::domain::entity::Principal;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};

/// Logout use case
pub struct LogoutUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
}

impl<A> LogoutUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>) -> Self {
        Self { account_repo }
    }

    pub async fn execute(&self, principal: &Principal) -> AuthResult<()> {
        authorize_action(principal, Action::Logout)?;

        let found = self
            .account_repo
            .record_session(principal.subject_id, None, false)
            .await?;
        if !found {
            return Err(AuthError::NotFound("Account"));
        }

        tracing::info!(account_id = %principal.subject_id, "Account logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::application::login::{LoginInput, LoginUseCase};
    use crate::application::register::{RegisterInput, RegisterUseCase};
    use crate::application::token_codec::TokenCodec;
    use crate::domain::value_object::user_role::UserRole;
    use crate::infra::memory::InMemoryAuthStore;
    use chrono::Utc;
    use kernel::id::AccountId;

    #[tokio::test]
    async fn test_login_logout_cycle() {
        let store = Arc::new(InMemoryAuthStore::new());
        let config = Arc::new(AuthConfig::development());
        let codec = Arc::new(TokenCodec::from_config(&config));

        RegisterUseCase::new(store.clone(), config.clone())
            .execute(RegisterInput {
                email: "ann@x.com".to_string(),
                name: "Ann".to_string(),
                password: "longenough1".to_string(),
            })
            .await
            .unwrap();

        let login = LoginUseCase::new(store.clone(), codec.clone(), config.clone())
            .execute(LoginInput {
                email: "ann@x.com".to_string(),
                password: "longenough1".to_string(),
            })
            .await
            .unwrap();
        let account_id = login.account.id;
        let stored = store.find_account(account_id).await.unwrap().unwrap();
        assert!(stored.is_logged_in());

        let principal = codec.verify(login.token.as_str(), Utc::now()).unwrap();
        LogoutUseCase::new(store.clone())
            .execute(&principal)
            .await
            .unwrap();

        let stored = store.find_account(account_id).await.unwrap().unwrap();
        assert!(!stored.active);
        assert!(stored.current_token.is_none());

        // Tokens are not revocable
        assert_eq!(
            codec.verify(login.token.as_str(), Utc::now()).unwrap(),
            principal
        );
    }

    #[tokio::test]
    async fn test_logout_of_deleted_account_is_not_found() {
        let store = Arc::new(InMemoryAuthStore::new());
        let principal = Principal::new(AccountId::new(404), UserRole::Regular);
        assert!(matches!(
            LogoutUseCase::new(store).execute(&principal).await,
            Err(AuthError::NotFound("Account"))
        ));
    }
}
