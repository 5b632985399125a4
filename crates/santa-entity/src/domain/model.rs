//! Email domain entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered email domain whose employees may take part.
///
/// Disabling a domain blocks its members' dashboards without deleting
/// any data.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmailDomain {
    /// Unique domain identifier.
    pub id: Uuid,
    /// Domain name, e.g. `"example.co.uk"` (unique, lowercased).
    pub name: String,
    /// Whether members of this domain may use the service.
    pub is_enabled: bool,
    /// When the domain was registered.
    pub created_at: DateTime<Utc>,
}

/// Joined row for the admin domain listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DomainWithUsers {
    /// Domain ID.
    pub id: Uuid,
    /// Domain name.
    pub name: String,
    /// Enabled flag.
    pub is_enabled: bool,
    /// Number of users registered under this domain.
    pub user_count: i64,
}
