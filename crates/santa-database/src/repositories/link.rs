//! Wishlist link repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use santa_core::error::{AppError, ErrorKind};
use santa_core::result::AppResult;
use santa_entity::link::{UpsertLink, WishlistLink};

/// Repository for wishlist link CRUD and counter operations.
#[derive(Debug, Clone)]
pub struct LinkRepository {
    pool: PgPool,
}

impl LinkRepository {
    /// Create a new link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's own wishlist link.
    pub async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Option<WishlistLink>> {
        sqlx::query_as::<_, WishlistLink>("SELECT * FROM links WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find link by owner", e)
            })
    }

    /// Create or replace a user's wishlist link.
    ///
    /// Counters survive a URL change; only the URL and the owner's
    /// current domain/department are refreshed.
    pub async fn upsert(&self, data: &UpsertLink) -> AppResult<WishlistLink> {
        sqlx::query_as::<_, WishlistLink>(
            "INSERT INTO links (owner_id, url, domain_id, department_id) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (owner_id) DO UPDATE \
                SET url = EXCLUDED.url, \
                    domain_id = EXCLUDED.domain_id, \
                    department_id = EXCLUDED.department_id, \
                    updated_at = NOW() \
             RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.url)
        .bind(data.domain_id)
        .bind(data.department_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert link", e))
    }

    /// Record a purchase against a link.
    pub async fn record_purchase(&self, link_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE links SET times_purchased = times_purchased + 1, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(link_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record purchase", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Link {link_id} not found")));
        }
        Ok(())
    }

    /// Record a problem report against a link.
    pub async fn record_error(&self, link_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE links SET error_count = error_count + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(link_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record error", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Link {link_id} not found")));
        }
        Ok(())
    }
}
