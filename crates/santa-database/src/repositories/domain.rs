//! Email domain repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use santa_core::error::{AppError, ErrorKind};
use santa_core::result::AppResult;
use santa_entity::domain::{DomainWithUsers, EmailDomain};

/// Repository for email domain CRUD and query operations.
#[derive(Debug, Clone)]
pub struct DomainRepository {
    pool: PgPool,
}

impl DomainRepository {
    /// Create a new domain repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a domain by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<EmailDomain>> {
        sqlx::query_as::<_, EmailDomain>("SELECT * FROM domains WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find domain", e))
    }

    /// Find a domain by name (case-insensitive).
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<EmailDomain>> {
        sqlx::query_as::<_, EmailDomain>("SELECT * FROM domains WHERE LOWER(name) = LOWER($1)")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find domain by name", e)
            })
    }

    /// List all domains with their user counts, ordered by name.
    pub async fn list_with_user_counts(&self) -> AppResult<Vec<DomainWithUsers>> {
        sqlx::query_as::<_, DomainWithUsers>(
            "SELECT d.id, d.name, d.is_enabled, COUNT(u.id) AS user_count \
             FROM domains d \
             LEFT JOIN users u ON u.domain_id = d.id \
             GROUP BY d.id, d.name, d.is_enabled \
             ORDER BY d.name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list domains", e))
    }

    /// Register a new domain.
    pub async fn create(&self, name: &str) -> AppResult<EmailDomain> {
        sqlx::query_as::<_, EmailDomain>(
            "INSERT INTO domains (name) VALUES (LOWER($1)) RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("domains_name_key") =>
            {
                AppError::conflict(format!("Domain '{name}' is already registered"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create domain", e),
        })
    }

    /// Flip a domain's enabled flag.
    pub async fn toggle_enabled(&self, id: Uuid) -> AppResult<EmailDomain> {
        sqlx::query_as::<_, EmailDomain>(
            "UPDATE domains SET is_enabled = NOT is_enabled WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to toggle domain", e))?
        .ok_or_else(|| AppError::not_found(format!("Domain {id} not found")))
    }

    /// Check whether any users are registered under a domain.
    pub async fn has_users(&self, id: Uuid) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE domain_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count domain users", e)
            })?;
        Ok(count > 0)
    }

    /// Delete a domain by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM domains WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete domain", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
