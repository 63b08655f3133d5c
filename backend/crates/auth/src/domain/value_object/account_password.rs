//! Account Password Value Object
//!
//! Domain wrapper over `platform::password`. Registration and password
//! changes go through [`RawPassword::new`] (policy applied); login goes
//! through [`RawPassword::presented`] (only compared against the hash).

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

use crate::error::{AuthError, AuthResult};

/// Password as typed by the user, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a newly chosen password
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, .. } => {
                AuthError::validation(format!("Password must be at least {} characters", min))
            }
            PasswordPolicyError::TooLong { max, .. } => {
                AuthError::validation(format!("Password must be at most {} characters", max))
            }
            PasswordPolicyError::EmptyOrWhitespace => AuthError::validation("Password is required"),
            PasswordPolicyError::InvalidCharacter => {
                AuthError::validation("Password contains invalid characters")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap a password presented at login
    pub fn presented(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Stored credential hash (Argon2id PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct AccountPassword(HashedPassword);

impl AccountPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        let hashed = raw.0.hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AuthError::Internal(format!("Password hashing failed: {}", msg))
            }
            PasswordHashError::InvalidHashFormat => {
                AuthError::Internal("Password hashing produced an invalid hash".to_string())
            }
        })?;

        Ok(Self(hashed))
    }

    /// Parse the hash read back from storage
    pub fn from_phc_string(phc_string: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|_| AuthError::Internal("Invalid password hash in database".to_string()))
    }

    /// Stand-in verified when no account matches the presented email
    pub fn decoy() -> Self {
        Self(HashedPassword::decoy())
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for AccountPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_password_policy() {
        assert!(RawPassword::new("longenough1".to_string()).is_ok());
        assert!(matches!(
            RawPassword::new("short".to_string()),
            Err(AuthError::Validation(msg)) if msg == "Password must be at least 8 characters"
        ));
        assert!(RawPassword::new(String::new()).is_err());
    }

    #[test]
    fn test_hash_differs_from_plaintext_and_verifies() {
        let raw = RawPassword::new("longenough1".to_string()).unwrap();
        let hashed = AccountPassword::from_raw(&raw, None).unwrap();

        assert_ne!(hashed.as_phc_string(), "longenough1");
        assert!(hashed.verify(&raw, None));
        assert!(!hashed.verify(&RawPassword::presented("longenough2".to_string()), None));
    }

    #[test]
    fn test_presented_password_skips_policy() {
        let raw = RawPassword::new("longenough1".to_string()).unwrap();
        let hashed = AccountPassword::from_raw(&raw, None).unwrap();
        // Too short to register, but must still simply fail to match
        assert!(!hashed.verify(&RawPassword::presented("short".to_string()), None));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("longenough1".to_string()).unwrap();
        let hashed = AccountPassword::from_raw(&raw, Some(b"pepper")).unwrap();
        let restored = AccountPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, Some(b"pepper")));
        assert!(AccountPassword::from_phc_string("not-a-hash").is_err());
    }
}
