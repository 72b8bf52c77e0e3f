/// User account persistence
///
/// Password hashes are written here but only ever read back through
/// `credentials`, never as part of a `User`.

use crate::crm::error::{StoreError, StoreResult};
use crate::crm::types::{User, UserInput};
use crate::rbac::Role;
use sqlx::sqlite::SqlitePool;

const SELECT: &str =
    "SELECT id, name, email, role, status, employee_id, created_at, updated_at FROM users";

/// A user row together with its stored password hash
#[derive(Debug, sqlx::FromRow)]
pub struct Credentials {
    #[sqlx(flatten)]
    pub user: User,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, role: Option<Role>) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "{SELECT} WHERE (?1 IS NULL OR role = ?1) ORDER BY name"
        ))
        .bind(role)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn get(&self, id: i64) -> StoreResult<User> {
        sqlx::query_as::<_, User>(&format!("{SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("user {id}")))
    }

    /// Look up a sign-in by email (case-insensitive)
    pub async fn credentials(&self, email: &str) -> StoreResult<Option<Credentials>> {
        let credentials = sqlx::query_as::<_, Credentials>(
            "SELECT id, name, email, role, status, employee_id, created_at, updated_at, password_hash \
             FROM users WHERE email = ?",
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await?;
        Ok(credentials)
    }

    pub async fn create(&self, input: &UserInput, password_hash: &str) -> StoreResult<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, role, status, employee_id, password_hash)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.name.trim())
        .bind(input.email.trim().to_lowercase())
        .bind(input.role)
        .bind(input.status)
        .bind(input.employee_id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    /// Full replace; a `None` hash keeps the current password
    pub async fn update(
        &self,
        id: i64,
        input: &UserInput,
        password_hash: Option<&str>,
    ) -> StoreResult<User> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = ?, email = ?, role = ?, status = ?, employee_id = ?,
                password_hash = COALESCE(?, password_hash),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(input.name.trim())
        .bind(input.email.trim().to_lowercase())
        .bind(input.role)
        .bind(input.status)
        .bind(input.employee_id)
        .bind(password_hash)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("user {id}")));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::from(err).on_delete("user"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("user {id}")));
        }
        Ok(())
    }
}
