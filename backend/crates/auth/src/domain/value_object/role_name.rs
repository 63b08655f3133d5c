//! Role name

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, AuthResult};

const ROLE_NAME_MAX_CHARS: usize = 64;

/// Unique, administrator-chosen role label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleName(String);

impl RoleName {
    pub fn new(name: impl Into<String>) -> AuthResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(AuthError::validation("Role name is required"));
        }
        if name.chars().count() > ROLE_NAME_MAX_CHARS {
            return Err(AuthError::validation(format!(
                "Role name must be at most {} characters",
                ROLE_NAME_MAX_CHARS
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

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
