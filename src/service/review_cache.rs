//! Listing cache for the review dashboards.
//!
//! The database rows are the source of truth; the cache holds derived
//! listing pages that are invalidated on mutation, never written back.
//! A status change patches the cached rows optimistically while the write
//! is in flight; the patch is then either confirmed (pages dropped so the
//! next read refetches) or rolled back (pre-patch snapshots restored).
//! Each mutation is an explicit state machine:
//! pending-optimistic -> confirmed | rolled-back.

use std::collections::HashMap;
use std::hash::Hash;

use tokio::sync::RwLock;

/// One cached listing page plus the bookkeeping infinite scroll needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedPage<T> {
    pub rows: Vec<T>,
    pub total_count: u64,
    pub has_more: bool,
}

/// States of one optimistic mutation. Confirmed and RolledBack are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    PendingOptimistic,
    Confirmed,
    RolledBack,
}

/// Handle for an in-flight optimistic mutation. Carries the pre-patch
/// snapshot of every page the patch touched, so a failed write restores
/// them exactly as they were.
#[derive(Debug)]
pub struct OptimisticMutation<K, T> {
    state: MutationState,
    snapshots: Vec<(K, CachedPage<T>)>,
}

impl<K, T> OptimisticMutation<K, T> {
    pub fn state(&self) -> MutationState {
        self.state
    }

    pub fn touched_pages(&self) -> usize {
        self.snapshots.len()
    }
}

pub struct ReviewCache<K, T> {
    pages: RwLock<HashMap<K, CachedPage<T>>>,
}

impl<K, T> ReviewCache<K, T>
where
    K: Eq + Hash + Clone + Send + Sync,
    T: Clone + Send + Sync,
{
    pub fn new() -> Self {
        ReviewCache {
            pages: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &K) -> Option<CachedPage<T>> {
        self.pages.read().await.get(key).cloned()
    }

    pub async fn put(&self, key: K, page: CachedPage<T>) {
        self.pages.write().await.insert(key, page);
    }

    /// Drops every page whose key satisfies the predicate.
    pub async fn invalidate_where<F>(&self, pred: F)
    where
        F: Fn(&K) -> bool,
    {
        self.pages.write().await.retain(|key, _| !pred(key));
    }

    pub async fn cached_pages(&self) -> usize {
        self.pages.read().await.len()
    }

    /// Applies `patch` to every cached row selected by `matches`,
    /// snapshotting each touched page first. The returned mutation is in
    /// the pending-optimistic state until confirmed or rolled back.
    pub async fn begin_mutation<M, P>(&self, matches: M, patch: P) -> OptimisticMutation<K, T>
    where
        M: Fn(&T) -> bool,
        P: Fn(&mut T),
    {
        let mut pages = self.pages.write().await;
        let mut snapshots = Vec::new();
        for (key, page) in pages.iter_mut() {
            if page.rows.iter().any(&matches) {
                snapshots.push((key.clone(), page.clone()));
                for row in page.rows.iter_mut().filter(|row| matches(row)) {
                    patch(row);
                }
            }
        }
        OptimisticMutation {
            state: MutationState::PendingOptimistic,
            snapshots,
        }
    }

    /// Pending-optimistic -> confirmed: the write succeeded, so the patched
    /// pages selected by `invalidate` are dropped and refetched on next
    /// read. A no-op in either terminal state.
    pub async fn confirm<F>(&self, mutation: &mut OptimisticMutation<K, T>, invalidate: F)
    where
        F: Fn(&K) -> bool,
    {
        if mutation.state != MutationState::PendingOptimistic {
            return;
        }
        self.invalidate_where(invalidate).await;
        mutation.snapshots.clear();
        mutation.state = MutationState::Confirmed;
    }

    /// Pending-optimistic -> rolled-back: the write failed, so every
    /// touched page is restored from its snapshot. A no-op in either
    /// terminal state.
    pub async fn rollback(&self, mutation: &mut OptimisticMutation<K, T>) {
        if mutation.state != MutationState::PendingOptimistic {
            return;
        }
        let mut pages = self.pages.write().await;
        for (key, snapshot) in mutation.snapshots.drain(..) {
            pages.insert(key, snapshot);
        }
        mutation.state = MutationState::RolledBack;
    }
}

impl<K, T> Default for ReviewCache<K, T>
where
    K: Eq + Hash + Clone + Send + Sync,
    T: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}
