//! Principal
//!
//! The authenticated identity of a request, derived solely from a verified
//! token. Never persisted.

use kernel::id::AccountId;

use crate::domain::value_object::user_role::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub subject_id: AccountId,
    pub role: UserRole,
}

impl Principal {
    pub fn new(subject_id: AccountId, role: UserRole) -> Self {
        Self { subject_id, role }
    }
}
