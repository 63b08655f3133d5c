//! Role Management Use Case
//!
//! Administrators create, list and delete roles. The two built-in roles
//! back the privilege levels carried in tokens and are never deleted.

use std::sync::Arc;

use kernel::id::RoleId;

use crate::application::authorization::{Action, authorize_action};
use crate::application::consistency_guard::guarded_insert;
use crate::domain::entity::{NewRole, Principal, Role};
use crate::domain::repository::RoleRepository;
use crate::domain::uniqueness::UniquenessKey;
use crate::domain::value_object::{role_name::RoleName, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Role management use case
pub struct RoleUseCase<R>
where
    R: RoleRepository,
{
    role_repo: Arc<R>,
}

impl<R> RoleUseCase<R>
where
    R: RoleRepository,
{
    pub fn new(role_repo: Arc<R>) -> Self {
        Self { role_repo }
    }

    pub async fn create(&self, principal: &Principal, name: String) -> AuthResult<Role> {
        authorize_action(principal, Action::CreateRole)?;

        let name = RoleName::new(name)?;
        let new_role = NewRole::new(name.clone());

        let role = guarded_insert(UniquenessKey::RoleName(name), || {
            self.role_repo.insert_role(&new_role)
        })
        .await?
        .into_result()?;

        tracing::info!(role_id = %role.id, role_name = %role.name, "Role created");
        Ok(role)
    }

    pub async fn list(&self, principal: &Principal) -> AuthResult<Vec<Role>> {
        authorize_action(principal, Action::ListRoles)?;
        self.role_repo.list_roles().await
    }

    pub async fn delete(&self, principal: &Principal, role_id: RoleId) -> AuthResult<()> {
        authorize_action(principal, Action::DeleteRole)?;

        if UserRole::from_id(role_id.value()).is_some() {
            return Err(AuthError::validation("Built-in roles cannot be deleted"));
        }
        if !self.role_repo.delete_role(role_id).await? {
            return Err(AuthError::NotFound("Role"));
        }

        tracing::info!(role_id = %role_id, "Role deleted");
        Ok(())
    }
}
