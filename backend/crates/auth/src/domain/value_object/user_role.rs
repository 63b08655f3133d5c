use kernel::id::RoleId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Privilege level carried by a principal
///
/// The integer encoding is part of the token wire format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(i16)]
pub enum UserRole {
    #[default]
    Regular = 1,
    Admin = 2,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Regular => "regular",
            UserRole::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Decode the wire integer; anything but 1 or 2 is rejected
    #[inline]
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(UserRole::Regular),
            2 => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Built-in role row backing this privilege level
    #[inline]
    pub const fn role_id(&self) -> RoleId {
        RoleId::new(self.id() as i64)
    }

    /// Privilege level granted to an account's role row
    ///
    /// Custom roles created by administrators grant no extra privilege.
    pub fn for_role_id(role_id: RoleId) -> Self {
        match Self::from_id(role_id.value()) {
            Some(role) => role,
            None => {
                tracing::warn!(role_id = %role_id, "Custom role grants regular privileges");
                UserRole::Regular
            }
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_id() {
        assert_eq!(UserRole::from_id(1), Some(UserRole::Regular));
        assert_eq!(UserRole::from_id(2), Some(UserRole::Admin));
        assert_eq!(UserRole::from_id(0), None);
        assert_eq!(UserRole::from_id(3), None);
    }

    #[test]
    fn test_user_role_ordering() {
        assert!(UserRole::Admin > UserRole::Regular);
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Regular.is_admin());
    }

    #[test]
    fn test_for_role_id() {
        assert_eq!(UserRole::for_role_id(RoleId::new(2)), UserRole::Admin);
        assert_eq!(UserRole::for_role_id(RoleId::new(1)), UserRole::Regular);
        assert_eq!(UserRole::for_role_id(RoleId::new(17)), UserRole::Regular);
        assert_eq!(UserRole::Admin.role_id(), RoleId::new(2));
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::Regular.to_string(), "regular");
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }
}
