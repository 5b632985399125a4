//! Department entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A department within a registered email domain.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Department {
    /// Unique department identifier.
    pub id: Uuid,
    /// The domain this department belongs to.
    pub domain_id: Uuid,
    /// Department name (unique within its domain).
    pub name: String,
    /// When the department was created.
    pub created_at: DateTime<Utc>,
}

/// Joined row for the admin department listing: department plus member
/// and wishlist-link counts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DepartmentSummary {
    /// Department ID.
    pub id: Uuid,
    /// Department name.
    pub name: String,
    /// Number of users in this department.
    pub user_count: i64,
    /// Number of wishlist links registered in this department.
    pub link_count: i64,
}
