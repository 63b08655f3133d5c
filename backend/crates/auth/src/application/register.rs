//! Register Use Case
//!
//! Creates a logged-out account with the regular role.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::consistency_guard::guarded_insert;
use crate::domain::entity::{Account, NewAccount};
use crate::domain::repository::AccountRepository;
use crate::domain::uniqueness::UniquenessKey;
use crate::domain::value_object::{
    account_name::AccountName,
    account_password::{AccountPassword, RawPassword},
    email::Email,
};
use crate::error::AuthResult;

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A> RegisterUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<Account> {
        let name = AccountName::new(input.name)?;
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        let password_hash = AccountPassword::from_raw(&raw_password, self.config.pepper())?;
        let new_account = NewAccount::register(email.clone(), name, password_hash);

        let account = guarded_insert(UniquenessKey::AccountEmail(email), || {
            self.account_repo.insert_account(&new_account)
        })
        .await?
        .into_result()?;

        tracing::info!(
            account_id = %account.id,
            email = %account.email,
            "Account registered"
        );

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_role::UserRole;
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryAuthStore;

    fn use_case(store: &Arc<InMemoryAuthStore>) -> RegisterUseCase<InMemoryAuthStore> {
        RegisterUseCase::new(store.clone(), Arc::new(AuthConfig::development()))
    }

    fn ann() -> RegisterInput {
        RegisterInput {
            email: "ann@x.com".to_string(),
            name: "Ann".to_string(),
            password: "longenough1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_creates_logged_out_regular_account() {
        let store = Arc::new(InMemoryAuthStore::new());
        let account = use_case(&store).execute(ann()).await.unwrap();

        assert!(!account.active);
        assert!(account.current_token.is_none());
        assert_eq!(account.role_id.value(), 1);
        assert_eq!(account.role(), UserRole::Regular);
        assert_ne!(account.password_hash.as_phc_string(), "longenough1");
        assert_eq!(account.name.as_str(), "Ann");
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = Arc::new(InMemoryAuthStore::new());
        let use_case = use_case(&store);
        use_case.execute(ann()).await.unwrap();

        let again = RegisterInput {
            email: "ANN@x.com".to_string(),
            name: "Another Ann".to_string(),
            password: "different-pass".to_string(),
        };
        assert!(matches!(
            use_case.execute(again).await,
            Err(AuthError::Conflict(msg)) if msg == "Email is already registered"
        ));
    }

    #[tokio::test]
    async fn test_register_validation() {
        let store = Arc::new(InMemoryAuthStore::new());
        let use_case = use_case(&store);

        let cases = [
            ("", "Ann", "longenough1"),
            ("ann@x.com", "", "longenough1"),
            ("ann@x.com", "Ann", ""),
            ("not-an-email", "Ann", "longenough1"),
            ("ann@x.com", "Ann", "short"),
        ];
        for (email, name, password) in cases {
            let result = use_case
                .execute(RegisterInput {
                    email: email.to_string(),
                    name: name.to_string(),
                    password: password.to_string(),
                })
                .await;
            assert!(
                matches!(result, Err(AuthError::Validation(_))),
                "{email:?} {name:?} {password:?}"
            );
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_yield_one_account() {
        const N: usize = 6;
        let store = Arc::new(InMemoryAuthStore::new());

        let mut handles = Vec::with_capacity(N);
        for _ in 0..N {
            let use_case = use_case(&store);
            handles.push(tokio::spawn(async move { use_case.execute(ann()).await }));
        }

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(AuthError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(conflicts, N - 1);
    }
}
