//! Fairness-ordered link selection with randomized tie-breaking.
//!
//! Candidates are sorted ascending by `(times_allocated, times_purchased,
//! error_count)` and consumed group by group; links sharing an identical
//! key are shuffled before being taken, so storage insertion order never
//! biases the choice among equally eligible links.

use rand::seq::SliceRandom;
use rand::thread_rng;

use santa_database::repositories::allocation::LinkSelector;
use santa_entity::allocation::AllocationSnapshot;
use santa_entity::link::LinkSummary;

/// Shuffles a tie group in place. Injected so tests can pin the order.
pub trait TieBreaker: Send + Sync {
    /// Apply a permutation to a group of equally eligible links.
    fn shuffle(&self, group: &mut [LinkSummary]);
}

/// Production tie-breaker: uniform Fisher–Yates shuffle.
#[derive(Debug, Clone, Default)]
pub struct RandomTieBreaker;

impl TieBreaker for RandomTieBreaker {
    fn shuffle(&self, group: &mut [LinkSummary]) {
        group.shuffle(&mut thread_rng());
    }
}

/// The fairness selection policy used by the allocation engine.
pub struct FairnessSelector {
    tie_breaker: Box<dyn TieBreaker>,
}

impl FairnessSelector {
    /// Create a selector with the given tie-breaker.
    pub fn new(tie_breaker: Box<dyn TieBreaker>) -> Self {
        Self { tie_breaker }
    }
}

impl LinkSelector for FairnessSelector {
    fn select(&self, snapshot: AllocationSnapshot, n: usize) -> Vec<LinkSummary> {
        let mut eligible = snapshot.eligible();
        if n == 0 || eligible.is_empty() {
            return Vec::new();
        }

        eligible.sort_by_key(LinkSummary::priority_key);

        let mut result = Vec::with_capacity(n.min(eligible.len()));
        let mut start = 0;
        while start < eligible.len() && result.len() < n {
            let key = eligible[start].priority_key();
            let mut end = start + 1;
            while end < eligible.len() && eligible[end].priority_key() == key {
                end += 1;
            }

            let group = &mut eligible[start..end];
            self.tie_breaker.shuffle(group);
            for link in group.iter() {
                if result.len() == n {
                    break;
                }
                result.push(link.clone());
            }

            start = end;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use uuid::Uuid;

    use super::*;

    /// Leaves every tie group in its sorted order.
    struct IdentityTieBreaker;

    impl TieBreaker for IdentityTieBreaker {
        fn shuffle(&self, _group: &mut [LinkSummary]) {}
    }

    /// Reverses each tie group — distinguishable from both identity and
    /// a global reversal.
    struct ReverseTieBreaker;

    impl TieBreaker for ReverseTieBreaker {
        fn shuffle(&self, group: &mut [LinkSummary]) {
            group.reverse();
        }
    }

    fn link(id: u128, allocated: i32, purchased: i32, errors: i32) -> LinkSummary {
        LinkSummary {
            id: Uuid::from_u128(id),
            url: format!("https://www.amazon.co.uk/hz/wishlist/ls/L{id}"),
            times_allocated: allocated,
            times_purchased: purchased,
            error_count: errors,
        }
    }

    fn snapshot(links: Vec<LinkSummary>) -> AllocationSnapshot {
        AllocationSnapshot {
            links,
            own_link_id: None,
            already_allocated: HashSet::new(),
        }
    }

    #[test]
    fn test_orders_by_counters_before_tie_breaking() {
        // The worked example: keys (2,0,0), (0,1,0), (0,0,0) — all
        // distinct, so the outcome is deterministic regardless of the
        // tie-breaker.
        let selector = FairnessSelector::new(Box::new(RandomTieBreaker));
        let picks = selector.select(
            snapshot(vec![link(1, 2, 0, 0), link(2, 0, 1, 0), link(3, 0, 0, 0)]),
            2,
        );

        let ids: Vec<Uuid> = picks.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![Uuid::from_u128(3), Uuid::from_u128(2)]);
    }

    #[test]
    fn test_least_allocated_wins() {
        let selector = FairnessSelector::new(Box::new(RandomTieBreaker));
        let picks = selector.select(snapshot(vec![link(1, 5, 0, 0), link(2, 0, 0, 0)]), 1);

        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].id, Uuid::from_u128(2));
    }

    #[test]
    fn test_returns_at_most_pool_size() {
        let selector = FairnessSelector::new(Box::new(RandomTieBreaker));
        let picks = selector.select(snapshot(vec![link(1, 0, 0, 0)]), 3);
        assert_eq!(picks.len(), 1);

        let picks = selector.select(snapshot(Vec::new()), 3);
        assert!(picks.is_empty());
    }

    #[test]
    fn test_excludes_own_and_already_allocated() {
        let selector = FairnessSelector::new(Box::new(RandomTieBreaker));
        let links = vec![link(1, 0, 0, 0), link(2, 0, 0, 0), link(3, 0, 0, 0)];
        let picks = selector.select(
            AllocationSnapshot {
                links,
                own_link_id: Some(Uuid::from_u128(1)),
                already_allocated: HashSet::from([Uuid::from_u128(2)]),
            },
            3,
        );

        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].id, Uuid::from_u128(3));
    }

    #[test]
    fn test_tie_breaker_applies_within_groups_only() {
        // Two tie groups: {1, 2} at (0,0,0) and {3, 4} at (1,0,0).
        // Reversing each group must not let the second group jump the
        // first.
        let selector = FairnessSelector::new(Box::new(ReverseTieBreaker));
        let picks = selector.select(
            snapshot(vec![
                link(1, 0, 0, 0),
                link(2, 0, 0, 0),
                link(3, 1, 0, 0),
                link(4, 1, 0, 0),
            ]),
            4,
        );

        let ids: Vec<Uuid> = picks.iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec![
                Uuid::from_u128(2),
                Uuid::from_u128(1),
                Uuid::from_u128(4),
                Uuid::from_u128(3),
            ]
        );
    }

    #[test]
    fn test_identity_tie_breaker_preserves_sorted_order() {
        let selector = FairnessSelector::new(Box::new(IdentityTieBreaker));
        let picks = selector.select(
            snapshot(vec![link(1, 0, 0, 0), link(2, 0, 0, 0), link(3, 0, 0, 0)]),
            3,
        );

        let ids: Vec<Uuid> = picks.iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec![Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)]
        );
    }

    #[test]
    fn test_random_tie_breaker_picks_from_best_group() {
        // With one strictly better group than the rest, randomness can
        // only permute inside it — the chosen set is fixed.
        let selector = FairnessSelector::new(Box::new(RandomTieBreaker));
        let links = vec![
            link(1, 0, 0, 0),
            link(2, 0, 0, 0),
            link(3, 7, 0, 0),
            link(4, 7, 0, 0),
        ];

        for _ in 0..20 {
            let picks = selector.select(snapshot(links.clone()), 2);
            let ids: HashSet<Uuid> = picks.iter().map(|p| p.id).collect();
            assert_eq!(ids, HashSet::from([Uuid::from_u128(1), Uuid::from_u128(2)]));
        }
    }
}
