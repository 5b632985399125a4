//! Wishlist link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's Amazon wishlist link with its fairness counters.
///
/// Each user owns at most one link (upsert semantics). The three
/// counters form the allocation priority key: links that have been
/// handed out, purchased from, or error-reported least come first.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WishlistLink {
    /// Unique link identifier.
    pub id: Uuid,
    /// The user who owns this wishlist.
    pub owner_id: Uuid,
    /// The wishlist URL.
    pub url: String,
    /// The owner's email domain at submission time.
    pub domain_id: Option<Uuid>,
    /// The owner's department at submission time.
    pub department_id: Option<Uuid>,
    /// How many times this link has been allocated to other users.
    pub times_allocated: i32,
    /// How many times a purchase has been reported against this link.
    pub times_purchased: i32,
    /// How many problems have been reported against this link.
    pub error_count: i32,
    /// When the link was first submitted.
    pub created_at: DateTime<Utc>,
    /// When the link was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data for creating or replacing a user's wishlist link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertLink {
    /// The owning user.
    pub owner_id: Uuid,
    /// The wishlist URL.
    pub url: String,
    /// The owner's email domain.
    pub domain_id: Option<Uuid>,
    /// The owner's department.
    pub department_id: Option<Uuid>,
}

/// The slice of a link that allocation works with and returns: identity,
/// URL, and the counter values as of before the current allocation's
/// increment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LinkSummary {
    /// Link ID.
    pub id: Uuid,
    /// Wishlist URL.
    pub url: String,
    /// Allocation counter.
    pub times_allocated: i32,
    /// Purchase counter.
    pub times_purchased: i32,
    /// Error counter.
    pub error_count: i32,
}

impl LinkSummary {
    /// The ascending lexicographic ordering key used for allocation
    /// fairness: fewer allocations, then fewer purchases, then fewer
    /// errors.
    pub fn priority_key(&self) -> (i32, i32, i32) {
        (self.times_allocated, self.times_purchased, self.error_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(allocated: i32, purchased: i32, errors: i32) -> LinkSummary {
        LinkSummary {
            id: Uuid::new_v4(),
            url: "https://www.amazon.co.uk/hz/wishlist/ls/TEST".to_string(),
            times_allocated: allocated,
            times_purchased: purchased,
            error_count: errors,
        }
    }

    #[test]
    fn test_priority_key_ordering() {
        // Allocation count dominates, then purchases, then errors.
        assert!(summary(0, 9, 9).priority_key() < summary(1, 0, 0).priority_key());
        assert!(summary(1, 0, 5).priority_key() < summary(1, 1, 0).priority_key());
        assert!(summary(1, 1, 0).priority_key() < summary(1, 1, 2).priority_key());
    }
}
