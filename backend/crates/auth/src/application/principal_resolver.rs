//! Principal Resolver
//!
//! Turns the `Authorization: Bearer <token>` header of a request into a
//! [`Principal`]. Every token failure collapses into
//! [`AuthnError::Invalid`]; the cause is only visible in debug logs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use http::HeaderMap;
use http::header::AUTHORIZATION;

use crate::application::token_codec::TokenCodec;
use crate::domain::entity::Principal;
use crate::error::AuthnError;

/// Case-sensitive scheme prefix
const BEARER_PREFIX: &str = "Bearer ";

pub struct PrincipalResolver {
    codec: Arc<TokenCodec>,
}

impl PrincipalResolver {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn resolve(&self, headers: &HeaderMap) -> Result<Principal, AuthnError> {
        self.resolve_at(headers, Utc::now())
    }

    pub fn resolve_at(
        &self,
        headers: &HeaderMap,
        now: DateTime<Utc>,
    ) -> Result<Principal, AuthnError> {
        let Some(value) = headers.get(AUTHORIZATION) else {
            return Err(AuthnError::Missing);
        };
        if value.is_empty() {
            return Err(AuthnError::Missing);
        }

        let value = value.to_str().map_err(|_| AuthnError::Invalid)?;
        let token = value
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AuthnError::Invalid)?;

        self.codec.verify(token, now).map_err(|e| {
            tracing::debug!(reason = %e, "Bearer token rejected");
            AuthnError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{email::Email, user_role::UserRole};
    use chrono::TimeZone;
    use http::HeaderValue;
    use kernel::id::AccountId;
    use std::time::Duration;

    const DAY: Duration = Duration::from_secs(86_400);

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn resolver() -> PrincipalResolver {
        PrincipalResolver::new(Arc::new(TokenCodec::new("secret-key", DAY)))
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn issue(resolver: &PrincipalResolver, role: UserRole) -> String {
        let email = Email::new("ann@x.com").unwrap();
        resolver
            .codec()
            .issue(AccountId::new(5), &email, role, DAY, t0())
            .unwrap()
            .into_string()
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            resolver().resolve_at(&HeaderMap::new(), t0()),
            Err(AuthnError::Missing)
        );
        assert_eq!(
            resolver().resolve_at(&headers_with(""), t0()),
            Err(AuthnError::Missing)
        );
    }

    #[test]
    fn test_valid_bearer_token() {
        let resolver = resolver();
        let token = issue(&resolver, UserRole::Admin);
        let principal = resolver
            .resolve_at(&headers_with(&format!("Bearer {}", token)), t0())
            .unwrap();
        assert_eq!(principal, Principal::new(AccountId::new(5), UserRole::Admin));
    }

    #[test]
    fn test_prefix_is_required_and_case_sensitive() {
        let resolver = resolver();
        let token = issue(&resolver, UserRole::Regular);
        for value in [
            token.clone(),
            format!("bearer {}", token),
            format!("BEARER {}", token),
            format!("Token {}", token),
        ] {
            assert_eq!(
                resolver.resolve_at(&headers_with(&value), t0()),
                Err(AuthnError::Invalid),
                "{}",
                value
            );
        }
    }

    #[test]
    fn test_token_failures_are_invalid() {
        let resolver = resolver();
        let token = issue(&resolver, UserRole::Regular);
        let expired = t0() + chrono::Duration::days(2);
        assert_eq!(
            resolver.resolve_at(&headers_with(&format!("Bearer {}", token)), expired),
            Err(AuthnError::Invalid)
        );
        assert_eq!(
            resolver.resolve_at(&headers_with("Bearer not.a.token"), t0()),
            Err(AuthnError::Invalid)
        );
    }

    #[test]
    fn test_non_utf8_header_is_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(b"Bearer \xff").unwrap());
        assert_eq!(resolver().resolve_at(&headers, t0()), Err(AuthnError::Invalid));
    }
}
