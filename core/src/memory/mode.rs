use cogseq_types::{StructureId, Weight};

use super::Trackable;

/// A single held choice, e.g. the outcome of a coin flip. Weight is 1.
#[derive(Debug)]
pub struct Mode<T> {
    id: StructureId,
    item: T,
}

impl<T> Mode<T> {
    #[must_use]
    pub fn new(item: T) -> Self {
        Self {
            id: StructureId::fresh(),
            item,
        }
    }

    #[must_use]
    pub fn get(&self) -> &T {
        &self.item
    }

    #[must_use]
    pub fn into_inner(self) -> T {
        self.item
    }
}

impl<T: Clone> Clone for Mode<T> {
    fn clone(&self) -> Self {
        Self::new(self.item.clone())
    }
}

impl<T> Trackable for Mode<T> {
    fn structure_id(&self) -> StructureId {
        self.id
    }

    fn compute_weight(&self) -> Weight {
        1
    }
}

/// Two already-determined elements packaged together. Weight is 2.
#[derive(Debug)]
pub struct Pair<T> {
    id: StructureId,
    first: T,
    second: T,
}

impl<T> Pair<T> {
    #[must_use]
    pub fn new(first: T, second: T) -> Self {
        Self {
            id: StructureId::fresh(),
            first,
            second,
        }
    }

    #[must_use]
    pub fn first(&self) -> &T {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &T {
        &self.second
    }

    #[must_use]
    pub fn into_parts(self) -> (T, T) {
        (self.first, self.second)
    }
}

impl<T> Trackable for Pair<T> {
    fn structure_id(&self) -> StructureId {
        self.id
    }

    fn compute_weight(&self) -> Weight {
        2
    }
}
