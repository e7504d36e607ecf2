//! Live-structure footprint tracking.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use cogseq_types::{StructureId, Weight};

#[derive(Debug, Default)]
struct SpaceState {
    active: HashMap<StructureId, Weight>,
    total: Weight,
    max_seen: Weight,
}

impl SpaceState {
    fn bump_peak(&mut self) {
        self.max_seen = self.max_seen.max(self.total);
    }
}

/// Weight table of the memory structures live in one run scope.
///
/// `total` is always the sum of the live weights and `max_seen` the largest
/// total ever reached. All three mutations serialize on one lock, so a
/// `Space` may be shared across threads.
#[derive(Debug, Default)]
pub struct Space {
    state: Mutex<SpaceState>,
}

impl Space {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Every update leaves the counters consistent, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, SpaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start tracking `id`. Registering an id that is already live is a no-op.
    pub fn register(&self, id: StructureId, weight: Weight) {
        let mut state = self.lock();
        if state.active.contains_key(&id) {
            return;
        }
        state.active.insert(id, weight);
        state.total += weight;
        state.bump_peak();
    }

    /// Replace the weight of `id`, tracking it if it was unknown.
    pub fn update(&self, id: StructureId, weight: Weight) {
        let mut state = self.lock();
        let old = state.active.insert(id, weight).unwrap_or(0);
        state.total = state.total - old + weight;
        state.bump_peak();
    }

    /// Stop tracking `id`. The recorded peak is kept.
    pub fn purge(&self, id: StructureId) {
        let mut state = self.lock();
        if let Some(weight) = state.active.remove(&id) {
            state.total -= weight;
        }
    }

    #[must_use]
    pub fn total(&self) -> Weight {
        self.lock().total
    }

    #[must_use]
    pub fn max_seen(&self) -> Weight {
        self.lock().max_seen
    }

    #[must_use]
    pub fn weight_of(&self, id: StructureId) -> Option<Weight> {
        self.lock().active.get(&id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: StructureId) -> bool {
        self.lock().active.contains_key(&id)
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.lock().active.len()
    }
}
