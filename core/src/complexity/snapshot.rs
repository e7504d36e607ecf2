//! Immutable per-run records and the history that aggregates them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cogseq_types::Weight;

/// Summary of one completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub label: String,
    /// Total primitive cost (description length).
    pub mdl: Weight,
    /// Call count per primitive name.
    pub breakdown: BTreeMap<String, u64>,
    /// Highest simultaneous weight of live structures.
    pub peak_space: Weight,
}

impl RunSnapshot {
    #[must_use]
    pub fn calls(&self, primitive: &str) -> u64 {
        self.breakdown.get(primitive).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_calls(&self) -> u64 {
        self.breakdown.values().sum()
    }
}

/// Ordered history of run snapshots owned by the caller.
///
/// Cost is additive across runs; space peaks are not, so the aggregate peak
/// is the largest single-run peak.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complexity {
    runs: Vec<RunSnapshot>,
}

impl Complexity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: RunSnapshot) {
        self.runs.push(snapshot);
    }

    /// Append every run of `other`, preserving order.
    pub fn absorb(&mut self, other: Complexity) {
        self.runs.extend(other.runs);
    }

    pub fn clear(&mut self) {
        self.runs.clear();
    }

    #[must_use]
    pub fn runs(&self) -> &[RunSnapshot] {
        &self.runs
    }

    #[must_use]
    pub fn last(&self) -> Option<&RunSnapshot> {
        self.runs.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    #[must_use]
    pub fn total_mdl(&self) -> Weight {
        self.runs.iter().map(|run| run.mdl).sum()
    }

    #[must_use]
    pub fn peak_space(&self) -> Weight {
        self.runs.iter().map(|run| run.peak_space).max().unwrap_or(0)
    }

    /// Call counts summed over every run.
    #[must_use]
    pub fn breakdown(&self) -> BTreeMap<String, u64> {
        let mut total = BTreeMap::new();
        for run in &self.runs {
            for (name, calls) in &run.breakdown {
                *total.entry(name.clone()).or_insert(0) += calls;
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(mdl: Weight, peak_space: Weight, calls: &[(&str, u64)]) -> RunSnapshot {
        RunSnapshot {
            label: "t".to_string(),
            mdl,
            breakdown: calls.iter().map(|(n, c)| ((*n).to_string(), *c)).collect(),
            peak_space,
        }
    }

    #[test]
    fn empty_history_aggregates_to_zero() {
        let history = Complexity::new();
        assert_eq!(history.total_mdl(), 0);
        assert_eq!(history.peak_space(), 0);
        assert!(history.last().is_none());
    }

    #[test]
    fn cost_sums_and_space_maxes() {
        let mut history = Complexity::new();
        history.push(snap(3, 10, &[("sample", 2)]));
        history.push(snap(4, 7, &[("sample", 1), ("add", 5)]));
        assert_eq!(history.total_mdl(), 7);
        assert_eq!(history.peak_space(), 10);
        assert_eq!(history.breakdown().get("sample"), Some(&3));
        assert_eq!(history.breakdown().get("add"), Some(&5));
        assert_eq!(history.last().unwrap().mdl, 4);
    }

    #[test]
    fn absorb_and_clear() {
        let mut a = Complexity::new();
        a.push(snap(1, 1, &[]));
        let mut b = Complexity::new();
        b.push(snap(2, 5, &[]));
        a.absorb(b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.runs()[1].mdl, 2);
        a.clear();
        assert!(a.is_empty());
    }

    #[test]
    fn history_serializes_as_a_list_of_runs() {
        let mut history = Complexity::new();
        history.push(snap(2, 3, &[("flip", 2)]));
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["runs"][0]["mdl"], 2);
        assert_eq!(json["runs"][0]["breakdown"]["flip"], 2);
        let back: Complexity = serde_json::from_value(json).unwrap();
        assert_eq!(back, history);
    }
}
