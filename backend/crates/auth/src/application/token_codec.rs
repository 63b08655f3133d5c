//! Token Codec
//!
//! Issues and verifies bearer tokens: JWT compact serialization signed with
//! HMAC-SHA256.
//!
//! ```text
//! base64url({"typ":"JWT","alg":"HS256"}) . base64url(claims) . base64url(mac)
//! claims = {"id": 5, "email": "ann@x.com", "role": 1, "iat": 1700000000, "exp": 1700086400}
//! ```
//!
//! `iat` is always issued but optional on verification; older tokens carry
//! only `id`, `email`, `role` and `exp`.
//!
//! Verification is a pure function of the token, the secret and `now`. The
//! role is taken from the claims and never re-read from storage.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use kernel::id::AccountId;
use platform::crypto::from_base64url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::domain::entity::Principal;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Why a token failed verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature does not match")]
    BadSignature,

    #[error("token has expired")]
    Expired,
}

/// Signed claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: i64,
    pub email: String,
    pub role: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    pub exp: i64,
}

/// An issued bearer token
#[derive(Debug, Clone)]
pub struct Token {
    value: String,
    claims: TokenClaims,
}

impl Token {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.claims.exp, 0)
    }
}

/// Token issuer and verifier bound to one secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: impl AsRef<[u8]>, default_ttl: Duration) -> Self {
        let secret = secret.as_ref();

        // Expiry is checked against the caller's `now`, not the system clock
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            default_ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.token_secret, config.token_ttl)
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issue a token for `account_id` valid from `now` until `now + ttl`
    pub fn issue(
        &self,
        account_id: AccountId,
        email: &Email,
        role: UserRole,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> AuthResult<Token> {
        let ttl_secs = i64::try_from(ttl.as_secs())
            .map_err(|_| AuthError::Internal("token ttl out of range".to_string()))?;
        let iat = now.timestamp();
        let exp = iat
            .checked_add(ttl_secs)
            .ok_or_else(|| AuthError::Internal("token expiry overflows".to_string()))?;

        let claims = TokenClaims {
            id: account_id.value(),
            email: email.as_str().to_string(),
            role: i64::from(role.id()),
            iat: Some(iat),
            exp,
        };

        let value = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("token encoding failed: {}", e)))?;

        Ok(Token { value, claims })
    }

    /// Verify a token string and recover its principal
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, TokenError> {
        let claims = self.verify_claims(token, now)?;
        let role = UserRole::from_id(claims.role).ok_or(TokenError::Malformed)?;
        Ok(Principal::new(AccountId::new(claims.id), role))
    }

    /// Verify a token string and return all of its claims
    pub fn verify_claims(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header, claims, _signature] = segments.as_slice() else {
            return Err(TokenError::Malformed);
        };

        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature => TokenError::BadSignature,
                // Only the signature segment is left once header and claims decode
                JwtErrorKind::Base64(_)
                    if from_base64url(header).is_ok() && from_base64url(claims).is_ok() =>
                {
                    TokenError::BadSignature
                }
                _ => TokenError::Malformed,
            })?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}
