//! Login Use Case
//!
//! Verifies credentials, issues a bearer token and records it in the
//! account's session mirror.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::application::token_codec::{Token, TokenCodec};
use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_password::{AccountPassword, RawPassword},
    email::Email,
};
use crate::error::{AuthError, AuthResult, AuthnError};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub token: Token,
    pub account: Account,
}

/// Login use case
pub struct LoginUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    codec: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<A> LoginUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, codec: Arc<TokenCodec>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            codec,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        self.execute_at(input, Utc::now()).await
    }

    /// Unknown email, malformed email and wrong password are indistinguishable
    pub async fn execute_at(&self, input: LoginInput, now: DateTime<Utc>) -> AuthResult<LoginOutput> {
        let raw_password = RawPassword::presented(input.password);
        let account = match Email::new(input.email) {
            Ok(email) => self.account_repo.find_account_by_email(&email).await?,
            Err(_) => None,
        };

        // Unknown accounts pay for one Argon2 verify like everyone else
        let decoy = AccountPassword::decoy();
        let password_hash = account.as_ref().map_or(&decoy, |a| &a.password_hash);
        let matched = password_hash.verify(&raw_password, self.config.pepper());
        let mut account = match account {
            Some(account) if matched => account,
            _ => return Err(AuthnError::Invalid.into()),
        };

        let token = self.codec.issue(
            account.id,
            &account.email,
            account.role(),
            self.config.token_ttl,
            now,
        )?;

        // Deleted between lookup and update
        if !self
            .account_repo
            .record_session(account.id, Some(token.as_str()), true)
            .await?
        {
            return Err(AuthError::from(AuthnError::Invalid));
        }
        account.current_token = Some(token.as_str().to_string());
        account.active = true;

        tracing::info!(
            account_id = %account.id,
            role = %account.role(),
            "Account logged in"
        );

        Ok(LoginOutput { token, account })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::register::{RegisterInput, RegisterUseCase};
    use crate::domain::entity::NewAccount;
    use crate::domain::value_object::{
        account_name::AccountName, account_password::AccountPassword, user_role::UserRole,
    };
    use crate::infra::memory::InMemoryAuthStore;
    use kernel::id::AccountId;

    struct Fixture {
        store: Arc<InMemoryAuthStore>,
        codec: Arc<TokenCodec>,
        config: Arc<AuthConfig>,
    }

    impl Fixture {
        async fn with_ann() -> Self {
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
            Self { store, codec, config }
        }

        fn login(&self) -> LoginUseCase<InMemoryAuthStore> {
            LoginUseCase::new(self.store.clone(), self.codec.clone(), self.config.clone())
        }
    }

    fn input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_token_and_marks_active() {
        let fx = Fixture::with_ann().await;
        let output = fx.login().execute(input("ann@x.com", "longenough1")).await.unwrap();

        assert!(!output.token.as_str().is_empty());
        let principal = fx.codec.verify(output.token.as_str(), Utc::now()).unwrap();
        assert_eq!(principal.subject_id, output.account.id);
        assert_eq!(principal.role, UserRole::Regular);

        let stored = fx
            .store
            .find_account(output.account.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.active);
        assert_eq!(stored.current_token.as_deref(), Some(output.token.as_str()));
    }

    #[tokio::test]
    async fn test_login_failures_are_identical() {
        let fx = Fixture::with_ann().await;
        let login = fx.login();

        for (email, password) in [
            ("ann@x.com", "wrong-password"),
            ("nobody@x.com", "longenough1"),
            ("not-an-email", "longenough1"),
            ("ann@x.com", ""),
        ] {
            let err = login.execute(input(email, password)).await.err().unwrap();
            assert!(
                matches!(err, AuthError::Unauthenticated(AuthnError::Invalid)),
                "{email} {password}"
            );
            assert_eq!(err.to_app_error().message(), "Unauthorized");
        }

        let stored = fx
            .store
            .find_account_by_email(&Email::new("ann@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.active);
    }

    #[tokio::test]
    async fn test_unknown_email_costs_a_password_verify() {
        let fx = Fixture::with_ann().await;
        let login = fx.login();

        let started = std::time::Instant::now();
        assert!(login.execute(input("ann@x.com", "wrong-password")).await.is_err());
        let wrong_password = started.elapsed();

        let started = std::time::Instant::now();
        assert!(login.execute(input("nobody@x.com", "wrong-password")).await.is_err());
        let unknown_email = started.elapsed();

        let started = std::time::Instant::now();
        assert!(login.execute(input("not-an-email", "wrong-password")).await.is_err());
        let malformed_email = started.elapsed();

        // Both failures are dominated by the Argon2 verify
        assert!(unknown_email * 4 >= wrong_password, "{unknown_email:?} vs {wrong_password:?}");
        assert!(malformed_email * 4 >= wrong_password, "{malformed_email:?} vs {wrong_password:?}");
    }

    #[tokio::test]
    async fn test_admin_account_gets_admin_token() {
        let fx = Fixture::with_ann().await;
        let raw = RawPassword::new("adminpass1".to_string()).unwrap();
        let admin = NewAccount {
            role_id: UserRole::Admin.role_id(),
            ..NewAccount::register(
                Email::new("root@x.com").unwrap(),
                AccountName::new("Root").unwrap(),
                AccountPassword::from_raw(&raw, fx.config.pepper()).unwrap(),
            )
        };
        fx.store.insert_account(&admin).await.unwrap();

        let output = fx.login().execute(input("root@x.com", "adminpass1")).await.unwrap();
        assert_eq!(output.token.claims().role, 2);
        assert_ne!(output.account.id, AccountId::new(0));
    }

    #[tokio::test]
    async fn test_token_expiry_follows_config() {
        let fx = Fixture::with_ann().await;
        let now = Utc::now();
        let output = fx
            .login()
            .execute_at(input("ann@x.com", "longenough1"), now)
            .await
            .unwrap();
        assert_eq!(output.token.claims().exp, now.timestamp() + 86_400);
    }
}
