//! Department repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use santa_core::error::{AppError, ErrorKind};
use santa_core::result::AppResult;
use santa_entity::department::{Department, DepartmentSummary};

/// Repository for department CRUD and query operations.
#[derive(Debug, Clone)]
pub struct DepartmentRepository {
    pool: PgPool,
}

impl DepartmentRepository {
    /// Create a new department repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a department by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Department>> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find department", e)
            })
    }

    /// List a domain's departments, ordered by name.
    pub async fn list_by_domain(&self, domain_id: Uuid) -> AppResult<Vec<Department>> {
        sqlx::query_as::<_, Department>(
            "SELECT * FROM departments WHERE domain_id = $1 ORDER BY name ASC",
        )
        .bind(domain_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list departments", e))
    }

    /// List a domain's departments with member and link counts (admin view).
    pub async fn list_with_counts(&self, domain_id: Uuid) -> AppResult<Vec<DepartmentSummary>> {
        sqlx::query_as::<_, DepartmentSummary>(
            "SELECT d.id, d.name, \
                    (SELECT COUNT(*) FROM users u WHERE u.department_id = d.id) AS user_count, \
                    (SELECT COUNT(*) FROM links l WHERE l.department_id = d.id) AS link_count \
             FROM departments d \
             WHERE d.domain_id = $1 \
             ORDER BY d.name ASC",
        )
        .bind(domain_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list department summaries", e)
        })
    }

    /// Find a department only if it belongs to the given domain.
    pub async fn find_in_domain(
        &self,
        id: Uuid,
        domain_id: Uuid,
    ) -> AppResult<Option<Department>> {
        sqlx::query_as::<_, Department>(
            "SELECT * FROM departments WHERE id = $1 AND domain_id = $2",
        )
        .bind(id)
        .bind(domain_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find department", e))
    }

    /// Add a department to a domain.
    pub async fn create(&self, domain_id: Uuid, name: &str) -> AppResult<Department> {
        sqlx::query_as::<_, Department>(
            "INSERT INTO departments (domain_id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(domain_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("departments_domain_id_name_key") =>
            {
                AppError::conflict(format!("Department '{name}' already exists in this domain"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create department", e),
        })
    }

    /// Delete a department by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete department", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
