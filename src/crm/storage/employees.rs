/// Employee persistence

use crate::crm::error::{StoreError, StoreResult};
use crate::crm::storage::optional_text;
use crate::crm::types::{Employee, EmployeeInput, EmployeeStatus};
use sqlx::sqlite::SqlitePool;

const SELECT: &str = "SELECT id, first_name, last_name, email, phone, department_id, \
    designation_id, status, hire_date, salary, created_at, updated_at FROM employees";

#[derive(Debug, Clone)]
pub struct EmployeeStorage {
    pool: SqlitePool,
}

impl EmployeeStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        status: Option<EmployeeStatus>,
        department_id: Option<i64>,
    ) -> StoreResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "{SELECT} WHERE (?1 IS NULL OR status = ?1) AND (?2 IS NULL OR department_id = ?2) \
             ORDER BY last_name, first_name"
        ))
        .bind(status)
        .bind(department_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Employee> {
        sqlx::query_as::<_, Employee>(&format!("{SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("employee {id}")))
    }

    pub async fn create(&self, input: &EmployeeInput) -> StoreResult<Employee> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees
                (first_name, last_name, email, phone, department_id, designation_id, status, hire_date, salary)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.first_name.trim())
        .bind(input.last_name.trim())
        .bind(input.email.trim().to_lowercase())
        .bind(optional_text(&input.phone))
        .bind(input.department_id)
        .bind(input.designation_id)
        .bind(input.status)
        .bind(optional_text(&input.hire_date))
        .bind(input.salary)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, input: &EmployeeInput) -> StoreResult<Employee> {
        let result = sqlx::query(
            r#"
            UPDATE employees SET
                first_name = ?, last_name = ?, email = ?, phone = ?, department_id = ?,
                designation_id = ?, status = ?, hire_date = ?, salary = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(input.first_name.trim())
        .bind(input.last_name.trim())
        .bind(input.email.trim().to_lowercase())
        .bind(optional_text(&input.phone))
        .bind(input.department_id)
        .bind(input.designation_id)
        .bind(input.status)
        .bind(optional_text(&input.hire_date))
        .bind(input.salary)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("employee {id}")));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::from(err).on_delete("employee"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("employee {id}")));
        }
        Ok(())
    }
}
