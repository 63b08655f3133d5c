//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, RoleId};
use sqlx::PgPool;

use crate::domain::entity::{Account, NewAccount, NewRole, Role};
use crate::domain::repository::{AccountRepository, RoleRepository};
use crate::domain::uniqueness::InsertOutcome;
use crate::domain::value_object::{
    account_name::AccountName, account_password::AccountPassword, email::Email,
    role_name::RoleName,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map a unique-index violation to [`InsertOutcome::Duplicate`]
pub fn unique_outcome<T, E>(result: Result<T, sqlx::Error>) -> Result<InsertOutcome<T>, E>
where
    E: From<sqlx::Error>,
{
    match result {
        Ok(value) => Ok(InsertOutcome::Created(value)),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            tracing::debug!(
                constraint = db.constraint().unwrap_or("unknown"),
                "Unique violation"
            );
            Ok(InsertOutcome::Duplicate)
        }
        Err(e) => Err(e.into()),
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

const ACCOUNT_COLUMNS: &str = r#"
    user_id,
    email,
    user_name,
    password_hash,
    role_id,
    access_token,
    active,
    created_at,
    updated_at
"#;

impl AccountRepository for PgAuthRepository {
    async fn insert_account(&self, account: &NewAccount) -> AuthResult<InsertOutcome<Account>> {
        let result = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            INSERT INTO users (
                email,
                user_name,
                password_hash,
                role_id,
                active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, FALSE, $5, $5)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account.email.as_str())
        .bind(account.name.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.role_id.value())
        .bind(account.created_at)
        .fetch_one(&self.pool)
        .await;

        match unique_outcome::<_, AuthError>(result)? {
            InsertOutcome::Created(row) => Ok(InsertOutcome::Created(row.into_account()?)),
            InsertOutcome::Duplicate => Ok(InsertOutcome::Duplicate),
        }
    }

    async fn find_account(&self, id: AccountId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_account_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn record_session(
        &self,
        id: AccountId,
        token: Option<&str>,
        active: bool,
    ) -> AuthResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE users SET
                access_token = $2,
                active = $3,
                updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(id.value())
        .bind(token)
        .bind(active)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn update_account(&self, account: &Account) -> AuthResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE users SET
                user_name = $2,
                password_hash = $3,
                updated_at = $4
            WHERE user_id = $1
            "#,
        )
        .bind(account.id.value())
        .bind(account.name.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(AuthError::NotFound("Account"));
        }
        Ok(())
    }

    async fn delete_account(&self, id: AccountId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Role Repository Implementation
// ============================================================================

impl RoleRepository for PgAuthRepository {
    async fn insert_role(&self, role: &NewRole) -> AuthResult<InsertOutcome<Role>> {
        let result = sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO roles (role_name, created_at, updated_at)
            VALUES ($1, $2, $2)
            RETURNING role_id, role_name, created_at, updated_at
            "#,
        )
        .bind(role.name.as_str())
        .bind(role.created_at)
        .fetch_one(&self.pool)
        .await;

        match unique_outcome::<_, AuthError>(result)? {
            InsertOutcome::Created(row) => Ok(InsertOutcome::Created(row.into_role())),
            InsertOutcome::Duplicate => Ok(InsertOutcome::Duplicate),
        }
    }

    async fn find_role(&self, id: RoleId) -> AuthResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT role_id, role_name, created_at, updated_at FROM roles WHERE role_id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RoleRow::into_role))
    }

    async fn list_roles(&self) -> AuthResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            "SELECT role_id, role_name, created_at, updated_at FROM roles ORDER BY role_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RoleRow::into_role).collect())
    }

    async fn delete_role(&self, id: RoleId) -> AuthResult<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE role_id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => Err(
                AuthError::Conflict("Role is still assigned to accounts".to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    user_id: i64,
    email: String,
    user_name: String,
    password_hash: String,
    role_id: i64,
    access_token: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let password_hash = AccountPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Account {
            id: AccountId::new(self.user_id),
            email: Email::from_db(self.email),
            name: AccountName::from_db(self.user_name),
            password_hash,
            role_id: RoleId::new(self.role_id),
            current_token: self.access_token,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    role_id: i64,
    role_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RoleRow {
    fn into_role(self) -> Role {
        Role {
            id: RoleId::new(self.role_id),
            name: RoleName::from_db(self.role_name),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
