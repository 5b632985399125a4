//! The allocation engine: hands out other users' wishlist links.
//!
//! A stateless request/response operation — no state is held between
//! calls. The batch size comes from configuration (3 on the first
//! request, 1 per "additional" request by default), and the store makes
//! the read-select-write sequence atomic.

use std::sync::Arc;

use tracing::info;

use santa_core::config::allocation::AllocationConfig;
use santa_core::result::AppResult;
use santa_database::repositories::allocation::AllocationStore;
use santa_entity::link::LinkSummary;

use crate::context::RequestContext;

use super::selector::{FairnessSelector, TieBreaker};

/// Produces a fair, randomized selection of links for a requesting user
/// and durably records the allocation.
pub struct AllocationEngine {
    /// Atomic storage for the read-select-write sequence.
    store: Arc<dyn AllocationStore>,
    /// Fairness policy with injected tie-breaking.
    selector: FairnessSelector,
    /// Batch size configuration.
    config: AllocationConfig,
}

impl AllocationEngine {
    /// Creates a new allocation engine.
    pub fn new(
        store: Arc<dyn AllocationStore>,
        tie_breaker: Box<dyn TieBreaker>,
        config: AllocationConfig,
    ) -> Self {
        Self {
            store,
            selector: FairnessSelector::new(tie_breaker),
            config,
        }
    }

    /// Allocate links to the requesting user.
    ///
    /// Returns up to `n` links (fewer when the eligible pool is smaller,
    /// empty when it is exhausted — neither is an error), each with its
    /// counters as of before this call's increment.
    pub async fn allocate(
        &self,
        ctx: &RequestContext,
        additional: bool,
    ) -> AppResult<Vec<LinkSummary>> {
        let n = if additional {
            self.config.additional_batch
        } else {
            self.config.initial_batch
        };

        let picks = self
            .store
            .allocate(ctx.user_id, n, additional, &self.selector)
            .await?;

        info!(
            user_id = %ctx.user_id,
            requested = n,
            allocated = picks.len(),
            additional,
            "Links allocated"
        );

        Ok(picks)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use async_trait::async_trait;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    use santa_database::repositories::allocation::LinkSelector;
    use santa_entity::allocation::AllocationSnapshot;

    use super::*;

    /// In-memory allocation store mirroring the Postgres store's
    /// contract: snapshot, select, and commit under one lock.
    struct InMemoryStore {
        state: Mutex<StoreState>,
    }

    struct StoreState {
        links: Vec<LinkSummary>,
        owners: HashMap<Uuid, Uuid>,
        allocations: Vec<(Uuid, Uuid, bool)>,
    }

    impl InMemoryStore {
        fn new(links: Vec<LinkSummary>, owners: HashMap<Uuid, Uuid>) -> Self {
            Self {
                state: Mutex::new(StoreState {
                    links,
                    owners,
                    allocations: Vec::new(),
                }),
            }
        }

        async fn counter_of(&self, link_id: Uuid) -> i32 {
            let state = self.state.lock().await;
            state
                .links
                .iter()
                .find(|l| l.id == link_id)
                .map(|l| l.times_allocated)
                .expect("link present")
        }

        async fn allocation_rows(&self, user_id: Uuid) -> Vec<(Uuid, bool)> {
            let state = self.state.lock().await;
            state
                .allocations
                .iter()
                .filter(|(u, _, _)| *u == user_id)
                .map(|(_, l, additional)| (*l, *additional))
                .collect()
        }
    }

    #[async_trait]
    impl AllocationStore for InMemoryStore {
        async fn allocate(
            &self,
            user_id: Uuid,
            n: usize,
            is_additional: bool,
            selector: &dyn LinkSelector,
        ) -> AppResult<Vec<LinkSummary>> {
            let mut state = self.state.lock().await;

            let snapshot = AllocationSnapshot {
                links: state.links.clone(),
                own_link_id: state.owners.get(&user_id).copied(),
                already_allocated: state
                    .allocations
                    .iter()
                    .filter(|(u, _, _)| *u == user_id)
                    .map(|(_, l, _)| *l)
                    .collect(),
            };

            let picks = selector.select(snapshot, n);
            for pick in &picks {
                state.allocations.push((user_id, pick.id, is_additional));
                let link = state
                    .links
                    .iter_mut()
                    .find(|l| l.id == pick.id)
                    .expect("picked link exists");
                link.times_allocated += 1;
            }

            Ok(picks)
        }
    }

    fn link(id: u128, allocated: i32) -> LinkSummary {
        LinkSummary {
            id: Uuid::from_u128(id),
            url: format!("https://www.amazon.co.uk/hz/wishlist/ls/L{id}"),
            times_allocated: allocated,
            times_purchased: 0,
            error_count: 0,
        }
    }

    fn ctx(user_id: Uuid) -> RequestContext {
        RequestContext::new(
            user_id,
            Uuid::new_v4(),
            "elf@north-pole.co.uk".to_string(),
            false,
            None,
            None,
        )
    }

    fn engine(store: Arc<InMemoryStore>) -> AllocationEngine {
        AllocationEngine::new(store, Box::new(crate::RandomTieBreaker), AllocationConfig::default())
    }

    #[tokio::test]
    async fn test_initial_request_allocates_three() {
        let user = Uuid::new_v4();
        let store = Arc::new(InMemoryStore::new(
            vec![link(1, 0), link(2, 0), link(3, 0), link(4, 0)],
            HashMap::new(),
        ));
        let engine = engine(Arc::clone(&store));

        let picks = engine.allocate(&ctx(user), false).await.unwrap();
        assert_eq!(picks.len(), 3);

        // One allocation row and one counter increment per pick, and the
        // returned counters are pre-increment values.
        let rows = store.allocation_rows(user).await;
        assert_eq!(rows.len(), 3);
        for pick in &picks {
            assert_eq!(pick.times_allocated, 0);
            assert_eq!(store.counter_of(pick.id).await, 1);
            assert!(rows.iter().any(|(l, additional)| *l == pick.id && !additional));
        }
    }

    #[tokio::test]
    async fn test_additional_request_allocates_one() {
        let user = Uuid::new_v4();
        let store = Arc::new(InMemoryStore::new(
            vec![link(1, 0), link(2, 0)],
            HashMap::new(),
        ));
        let engine = engine(Arc::clone(&store));

        let picks = engine.allocate(&ctx(user), true).await.unwrap();
        assert_eq!(picks.len(), 1);

        let rows = store.allocation_rows(user).await;
        assert_eq!(rows, vec![(picks[0].id, true)]);
    }

    #[tokio::test]
    async fn test_never_allocates_own_link() {
        let user = Uuid::new_v4();
        let own = Uuid::from_u128(1);
        let store = Arc::new(InMemoryStore::new(
            vec![link(1, 0), link(2, 0)],
            HashMap::from([(user, own)]),
        ));
        let engine = engine(Arc::clone(&store));

        let picks = engine.allocate(&ctx(user), false).await.unwrap();
        assert_eq!(picks.len(), 1);
        assert_ne!(picks[0].id, own);
    }

    #[tokio::test]
    async fn test_consecutive_calls_never_overlap() {
        let user = Uuid::new_v4();
        let store = Arc::new(InMemoryStore::new(
            (1..=6).map(|i| link(i, 0)).collect(),
            HashMap::new(),
        ));
        let engine = engine(Arc::clone(&store));

        let first = engine.allocate(&ctx(user), false).await.unwrap();
        let second = engine.allocate(&ctx(user), false).await.unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 3);

        let first_ids: HashSet<Uuid> = first.iter().map(|p| p.id).collect();
        let second_ids: HashSet<Uuid> = second.iter().map(|p| p.id).collect();
        assert!(first_ids.is_disjoint(&second_ids));
    }

    #[tokio::test]
    async fn test_small_pool_returns_what_is_available() {
        let user = Uuid::new_v4();
        let store = Arc::new(InMemoryStore::new(vec![link(1, 0)], HashMap::new()));
        let engine = engine(Arc::clone(&store));

        let picks = engine.allocate(&ctx(user), false).await.unwrap();
        assert_eq!(picks.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_pool_returns_empty_without_writes() {
        let user = Uuid::new_v4();
        let own = Uuid::from_u128(1);
        let store = Arc::new(InMemoryStore::new(
            vec![link(1, 0)],
            HashMap::from([(user, own)]),
        ));
        let engine = engine(Arc::clone(&store));

        let picks = engine.allocate(&ctx(user), false).await.unwrap();
        assert!(picks.is_empty());
        assert!(store.allocation_rows(user).await.is_empty());
        assert_eq!(store.counter_of(own).await, 0);
    }

    #[tokio::test]
    async fn test_prefers_least_allocated_across_calls() {
        // After user A drains the fresh links, a second user must pick
        // up the now-least-allocated remainder first.
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let store = Arc::new(InMemoryStore::new(
            vec![link(1, 0), link(2, 0), link(3, 0), link(4, 5)],
            HashMap::new(),
        ));
        let engine = engine(Arc::clone(&store));

        let first = engine.allocate(&ctx(a), false).await.unwrap();
        let first_ids: HashSet<Uuid> = first.iter().map(|p| p.id).collect();
        assert_eq!(
            first_ids,
            HashSet::from([Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)])
        );

        // Links 1-3 now sit at one allocation each; link 4 still trails
        // at 5, so user B's single pick comes from 1-3.
        let second = engine.allocate(&ctx(b), true).await.unwrap();
        assert_eq!(second.len(), 1);
        assert!(first_ids.contains(&second[0].id));
        assert_eq!(second[0].times_allocated, 1);
    }
}
