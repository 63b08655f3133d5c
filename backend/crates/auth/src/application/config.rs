//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::crypto::random_bytes;

use crate::error::{AuthError, AuthResult};

/// Default bearer token lifetime
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

/// Longest token lifetime accepted from configuration (one year)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 3600);

const GENERATED_SECRET_LEN: usize = 32;

/// Auth application configuration
///
/// Built only from a secret: [`AuthConfig::with_secret`] or one of the
/// random-secret constructors.
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 signing secret shared by every token issued by this process
    pub token_secret: Vec<u8>,
    /// Lifetime of tokens issued at login (24 hours)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    /// Create config from an explicit secret (the raw bytes of `TOKEN_SECRET`)
    pub fn with_secret(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            token_secret: secret.into(),
            token_ttl: DEFAULT_TOKEN_TTL,
            password_pepper: None,
        }
    }

    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        Self::with_secret(random_bytes(GENERATED_SECRET_LEN))
    }

    /// Create config for development (random secret, tokens lost on restart)
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Override the token lifetime
    ///
    /// Zero and anything above [`MAX_TOKEN_TTL`] are rejected so that expiry
    /// arithmetic at issue time cannot fail.
    pub fn token_ttl(mut self, ttl: Duration) -> AuthResult<Self> {
        if ttl.is_zero() || ttl > MAX_TOKEN_TTL {
            return Err(AuthError::Validation(format!(
                "Token lifetime must be between 1 and {} seconds",
                MAX_TOKEN_TTL.as_secs()
            )));
        }
        self.token_ttl = ttl;
        Ok(self)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_is_one_day() {
        assert_eq!(AuthConfig::with_secret("secret-key").token_ttl, Duration::from_secs(86_400));
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_eq!(a.token_secret.len(), 32);
        assert!(a.token_secret.iter().any(|&b| b != 0));
        assert_ne!(a.token_secret, b.token_secret);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AuthConfig::with_secret("secret-key")
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_token_ttl_override() {
        let config = AuthConfig::development()
            .token_ttl(Duration::from_secs(60))
            .unwrap();
        assert_eq!(config.token_ttl, Duration::from_secs(60));
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_token_ttl_out_of_range_is_rejected() {
        for ttl in [Duration::ZERO, MAX_TOKEN_TTL + Duration::from_secs(1), Duration::MAX] {
            let result = AuthConfig::development().token_ttl(ttl);
            assert!(matches!(result, Err(AuthError::Validation(_))), "{:?}", ttl);
        }
        assert!(AuthConfig::development().token_ttl(MAX_TOKEN_TTL).is_ok());
    }
}
