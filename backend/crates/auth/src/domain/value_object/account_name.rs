//! Account display name

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, AuthResult};

const NAME_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountName(String);

impl AccountName {
    pub fn new(name: impl Into<String>) -> AuthResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(AuthError::validation("Name is required"));
        }
        if name.chars().count() > NAME_MAX_CHARS {
            return Err(AuthError::validation(format!(
                "Name must be at most {} characters",
                NAME_MAX_CHARS
            )));
        }
        Ok(Self(name))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
