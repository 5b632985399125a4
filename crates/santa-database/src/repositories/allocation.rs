//! Link allocation repository and the storage contract the allocation
//! engine runs against.
//!
//! The read-select-write sequence is a single transaction with the link
//! rows locked `FOR UPDATE`, so two concurrent allocation requests cannot
//! select from the same stale counter snapshot. Selection itself is pure
//! logic injected via [`LinkSelector`], which keeps this repository free
//! of fairness policy and lets tests run the engine against an in-memory
//! store.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use santa_core::error::{AppError, ErrorKind};
use santa_core::result::AppResult;
use santa_entity::allocation::{AllocationSnapshot, LinkAllocation};
use santa_entity::link::LinkSummary;

/// Pure selection policy: given the snapshot of links eligible for a
/// user, pick up to `n` of them, in order.
pub trait LinkSelector: Send + Sync {
    /// Select up to `n` links from the snapshot's eligible pool.
    fn select(&self, snapshot: AllocationSnapshot, n: usize) -> Vec<LinkSummary>;
}

/// Storage contract for the allocation engine.
///
/// Implementations must make the whole read-select-write sequence
/// atomic: either every returned link has its allocation row and counter
/// increment committed, or nothing is.
#[async_trait]
pub trait AllocationStore: Send + Sync {
    /// Atomically select up to `n` links for `user_id` via `selector`,
    /// record one allocation row per pick, and increment each picked
    /// link's allocation counter. Returns the picks with their counter
    /// values as of before the increment.
    async fn allocate(
        &self,
        user_id: Uuid,
        n: usize,
        is_additional: bool,
        selector: &dyn LinkSelector,
    ) -> AppResult<Vec<LinkSummary>>;
}

/// Repository for allocation rows, backing both the engine's atomic
/// commit path and the read-side queries.
#[derive(Debug, Clone)]
pub struct AllocationRepository {
    pool: PgPool,
}

impl AllocationRepository {
    /// Create a new allocation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Links previously allocated to a user, oldest first.
    pub async fn find_allocated_links(&self, user_id: Uuid) -> AppResult<Vec<LinkSummary>> {
        sqlx::query_as::<_, LinkSummary>(
            "SELECT l.id, l.url, l.times_allocated, l.times_purchased, l.error_count \
             FROM link_allocations a \
             JOIN links l ON a.link_id = l.id \
             WHERE a.user_id = $1 \
             ORDER BY a.allocated_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list allocated links", e)
        })
    }

    /// Look up a user's allocation of a specific link, if any.
    pub async fn find_allocation(
        &self,
        user_id: Uuid,
        link_id: Uuid,
    ) -> AppResult<Option<LinkAllocation>> {
        sqlx::query_as::<_, LinkAllocation>(
            "SELECT * FROM link_allocations WHERE user_id = $1 AND link_id = $2",
        )
        .bind(user_id)
        .bind(link_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find allocation", e))
    }
}

#[async_trait]
impl AllocationStore for AllocationRepository {
    async fn allocate(
        &self,
        user_id: Uuid,
        n: usize,
        is_additional: bool,
        selector: &dyn LinkSelector,
    ) -> AppResult<Vec<LinkSummary>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin allocation", e)
        })?;

        // Locks every candidate row until commit so concurrent requests
        // observe this request's counter increments. Taken before the
        // per-user reads: a racing duplicate request blocks here and then
        // sees this request's allocation rows.
        let links: Vec<LinkSummary> = sqlx::query_as(
            "SELECT id, url, times_allocated, times_purchased, error_count \
             FROM links ORDER BY id FOR UPDATE",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load links", e))?;

        let already_allocated: Vec<Uuid> =
            sqlx::query_scalar("SELECT link_id FROM link_allocations WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to load prior allocations",
                        e,
                    )
                })?;

        let own_link_id: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM links WHERE owner_id = $1")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to load own link", e)
                })?;

        let snapshot = AllocationSnapshot {
            links,
            own_link_id,
            already_allocated: already_allocated.into_iter().collect::<HashSet<_>>(),
        };

        let picks = selector.select(snapshot, n);
        if picks.is_empty() {
            tx.commit().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to commit allocation", e)
            })?;
            return Ok(picks);
        }

        for pick in &picks {
            sqlx::query(
                "INSERT INTO link_allocations (user_id, link_id, is_additional) \
                 VALUES ($1, $2, $3)",
            )
            .bind(user_id)
            .bind(pick.id)
            .bind(is_additional)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert allocation", e)
            })?;
        }

        let pick_ids: Vec<Uuid> = picks.iter().map(|p| p.id).collect();
        sqlx::query(
            "UPDATE links SET times_allocated = times_allocated + 1, updated_at = NOW() \
             WHERE id = ANY($1)",
        )
        .bind(&pick_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to increment counters", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit allocation", e)
        })?;

        Ok(picks)
    }
}
