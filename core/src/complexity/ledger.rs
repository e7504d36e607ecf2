//! Per-primitive call and cost accounting.

use std::collections::BTreeMap;

use cogseq_types::Weight;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    calls: u64,
    cost: Weight,
}

/// Record of every primitive invoked during one run.
///
/// Call counts and cost are kept apart: a forced choice (sampling a singleton)
/// is still a call, but contributes nothing to the description length.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    tallies: BTreeMap<String, Tally>,
    total: Weight,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str, weight: Weight) {
        let tally = self.tallies.entry(name.to_string()).or_default();
        tally.calls += 1;
        tally.cost += weight;
        self.total += weight;
    }

    /// Sum of all recorded weights.
    #[must_use]
    pub fn total(&self) -> Weight {
        self.total
    }

    #[must_use]
    pub fn calls(&self, name: &str) -> u64 {
        self.tallies.get(name).map_or(0, |t| t.calls)
    }

    #[must_use]
    pub fn cost(&self, name: &str) -> Weight {
        self.tallies.get(name).map_or(0, |t| t.cost)
    }

    #[must_use]
    pub fn total_calls(&self) -> u64 {
        self.tallies.values().map(|t| t.calls).sum()
    }

    /// Call counts keyed by primitive name, in name order.
    #[must_use]
    pub fn counts(&self) -> BTreeMap<String, u64> {
        self.tallies
            .iter()
            .map(|(name, tally)| (name.clone(), tally.calls))
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }
}
