//! Link allocation entity model.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::link::LinkSummary;

/// A durable record that a link has been assigned to a user for
/// gift-giving. Immutable once created; the composite primary key
/// `(user_id, link_id)` guarantees a link is never handed to the same
/// user twice.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LinkAllocation {
    /// The receiving user.
    pub user_id: Uuid,
    /// The allocated link.
    pub link_id: Uuid,
    /// Whether this came from an "additional" request rather than the
    /// initial batch.
    pub is_additional: bool,
    /// When the allocation was recorded.
    pub allocated_at: DateTime<Utc>,
}

/// Everything the allocation selection needs to know, read in one
/// consistent view: the full link table plus the requesting user's own
/// link and prior allocations.
#[derive(Debug, Clone)]
pub struct AllocationSnapshot {
    /// Every link in the system with its counters.
    pub links: Vec<LinkSummary>,
    /// The requesting user's own link ID, if they have submitted one.
    pub own_link_id: Option<Uuid>,
    /// Link IDs already allocated to the requesting user.
    pub already_allocated: HashSet<Uuid>,
}

impl AllocationSnapshot {
    /// Filter down to the links the requesting user may receive: not
    /// their own, and not previously allocated to them.
    pub fn eligible(self) -> Vec<LinkSummary> {
        let own = self.own_link_id;
        let allocated = self.already_allocated;
        self.links
            .into_iter()
            .filter(|link| Some(link.id) != own && !allocated.contains(&link.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: Uuid) -> LinkSummary {
        LinkSummary {
            id,
            url: format!("https://www.amazon.co.uk/hz/wishlist/ls/{id}"),
            times_allocated: 0,
            times_purchased: 0,
            error_count: 0,
        }
    }

    #[test]
    fn test_eligible_excludes_own_and_allocated() {
        let own = Uuid::new_v4();
        let taken = Uuid::new_v4();
        let open = Uuid::new_v4();

        let snapshot = AllocationSnapshot {
            links: vec![summary(own), summary(taken), summary(open)],
            own_link_id: Some(own),
            already_allocated: HashSet::from([taken]),
        };

        let eligible = snapshot.eligible();
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, open);
    }
}
