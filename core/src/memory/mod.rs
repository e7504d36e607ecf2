//! Memory structures a cognitive strategy can hold while it works.
//!
//! Every structure except [`Sequence`] implements [`Trackable`]: it has an
//! identity and a scalar weight, and its mutating methods take the
//! [`Tracker`] so the current run scope sees the new weight immediately.

mod containers;
mod graph;
mod lexicon;
mod mode;
mod sequence;

pub use containers::{List, Queue};
pub use graph::{Edge, EdgeLabel, LexiconGraph, Node};
pub use lexicon::{Layout, Lexicon};
pub use mode::{Mode, Pair};
pub use sequence::Sequence;

use cogseq_types::{StructureId, Token, Weight};

use crate::complexity::Tracker;

/// Capability of a memory structure that participates in space accounting.
pub trait Trackable {
    fn structure_id(&self) -> StructureId;

    fn compute_weight(&self) -> Weight;

    /// Push the current weight to the active scope. Call after every mutation.
    fn changed(&self, tracker: &Tracker) {
        tracker.update(self.structure_id(), self.compute_weight());
    }
}

impl Trackable for Token {
    fn structure_id(&self) -> StructureId {
        self.id()
    }

    fn compute_weight(&self) -> Weight {
        self.weight()
    }
}

/// A destination primitives can write an element into.
pub trait Sink<T> {
    fn put(&mut self, tracker: &Tracker, item: T);
}
