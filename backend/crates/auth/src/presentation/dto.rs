//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Account, Role};

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    /// Unix seconds
    pub expires_at: i64,
    pub account: AccountView,
}

// ============================================================================
// Account
// ============================================================================

/// Own-account update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Account as returned to clients (no hash, no token)
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role_id: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.value(),
            email: account.email.as_str().to_string(),
            name: account.name.as_str().to_string(),
            role_id: account.role_id.value(),
            active: account.active,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

// ============================================================================
// Role
// ============================================================================

/// Role create request
#[derive(Debug, Clone, Deserialize)]
pub struct RoleRequest {
    pub role_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleView {
    pub id: i64,
    pub role_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Role> for RoleView {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id.value(),
            role_name: role.name.as_str().to_string(),
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
