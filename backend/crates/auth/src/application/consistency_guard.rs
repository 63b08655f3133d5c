//! Consistency Guard
//!
//! Wraps inserts that claim a [`UniquenessKey`]. The store's declared unique
//! constraint decides the race: of any number of concurrent inserts under
//! the same key exactly one observes `Created`.

use std::future::Future;

use crate::domain::uniqueness::{InsertOutcome, UniquenessKey};
use crate::error::{AuthError, AuthResult};

/// Result of a guarded insert; storage failures travel in the `Err` arm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    Created(T),
    Conflict(UniquenessKey),
}

impl<T> Guarded<T> {
    /// Collapse `Conflict` into [`AuthError::Conflict`]
    pub fn into_result(self) -> AuthResult<T> {
        match self {
            Guarded::Created(value) => Ok(value),
            Guarded::Conflict(key) => Err(AuthError::Conflict(key.to_string())),
        }
    }
}

/// Run `insert` under `key`
pub async fn guarded_insert<T, E, F, Fut>(key: UniquenessKey, insert: F) -> Result<Guarded<T>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<InsertOutcome<T>, E>>,
{
    match insert().await? {
        InsertOutcome::Created(value) => Ok(Guarded::Created(value)),
        InsertOutcome::Duplicate => {
            tracing::info!(constraint = key.constraint(), "Uniqueness conflict");
            Ok(Guarded::Conflict(key))
        }
    }
}
