//! Role Entity

use chrono::{DateTime, Utc};
use kernel::id::RoleId;

use crate::domain::value_object::{role_name::RoleName, user_role::UserRole};

#[derive(Debug, Clone)]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Regular and Admin rows are seeded and referenced by the token encoding
    pub fn is_built_in(&self) -> bool {
        UserRole::from_id(self.id.value()).is_some()
    }
}

#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: RoleName,
    pub created_at: DateTime<Utc>,
}

impl NewRole {
    pub fn new(name: RoleName) -> Self {
        Self {
            name,
            created_at: Utc::now(),
        }
    }

    pub fn into_role(self, id: RoleId) -> Role {
        Role {
            id,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
