//! Ordered scratch containers: lists and queues.

use std::collections::VecDeque;

use cogseq_types::{StructureId, Weight};

use super::{Sink, Trackable};
use crate::complexity::Tracker;

/// Duplicate-permitting ordered scratch space. Weight = element count.
#[derive(Debug)]
pub struct List<T> {
    id: StructureId,
    items: VecDeque<T>,
}

impl<T> List<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: StructureId::fresh(),
            items: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            id: StructureId::fresh(),
            items: items.into_iter().collect(),
        }
    }

    /// Append at the end.
    pub fn suffix(&mut self, tracker: &Tracker, item: T) {
        self.items.push_back(item);
        self.changed(tracker);
    }

    /// Insert at the front.
    pub fn prefix(&mut self, tracker: &Tracker, item: T) {
        self.items.push_front(item);
        self.changed(tracker);
    }

    pub fn pop_front(&mut self, tracker: &Tracker) -> Option<T> {
        let item = self.items.pop_front();
        if item.is_some() {
            self.changed(tracker);
        }
        item
    }

    pub fn pop_back(&mut self, tracker: &Tracker) -> Option<T> {
        let item = self.items.pop_back();
        if item.is_some() {
            self.changed(tracker);
        }
        item
    }

    pub fn clear(&mut self, tracker: &Tracker) {
        self.items.clear();
        self.changed(tracker);
    }

    pub fn reverse(&mut self, tracker: &Tracker) {
        self.items.make_contiguous().reverse();
        self.changed(tracker);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.items.front()
    }

    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items.into()
    }
}

impl<T: Clone> List<T> {
    /// Replace the contents with a copy of `other`'s.
    pub fn clone_from_list(&mut self, tracker: &Tracker, other: &List<T>) {
        self.items.clone_from(&other.items);
        self.changed(tracker);
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        Self::from_items(self.items.iter().cloned())
    }
}

impl<T> Trackable for List<T> {
    fn structure_id(&self) -> StructureId {
        self.id
    }

    fn compute_weight(&self) -> Weight {
        self.items.len() as Weight
    }
}

impl<T> Sink<T> for List<T> {
    fn put(&mut self, tracker: &Tracker, item: T) {
        self.suffix(tracker, item);
    }
}

/// Scratch queue: items enter at the front and leave from the back, so
/// consistent use is first-in first-out. Weight = element count.
#[derive(Debug)]
pub struct Queue<T> {
    id: StructureId,
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: StructureId::fresh(),
            items: VecDeque::new(),
        }
    }

    /// Items in arrival order; the first one is the first to leave.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        let mut queue = Self::new();
        for item in items {
            queue.items.push_front(item);
        }
        queue
    }

    pub fn push_in(&mut self, tracker: &Tracker, item: T) {
        self.items.push_front(item);
        self.changed(tracker);
    }

    pub fn push_out(&mut self, tracker: &Tracker) -> Option<T> {
        let item = self.items.pop_back();
        if item.is_some() {
            self.changed(tracker);
        }
        item
    }

    pub fn clear(&mut self, tracker: &Tracker) {
        self.items.clear();
        self.changed(tracker);
    }

    /// The item `push_out` would return next.
    #[must_use]
    pub fn peek_out(&self) -> Option<&T> {
        self.items.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items from the next to leave to the most recently added.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter().rev()
    }
}

impl<T: Clone> Queue<T> {
    pub fn clone_from_queue(&mut self, tracker: &Tracker, other: &Queue<T>) {
        self.items.clone_from(&other.items);
        self.changed(tracker);
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Queue<T> {
    fn clone(&self) -> Self {
        Self {
            id: StructureId::fresh(),
            items: self.items.clone(),
        }
    }
}

impl<T> Trackable for Queue<T> {
    fn structure_id(&self) -> StructureId {
        self.id
    }

    fn compute_weight(&self) -> Weight {
        self.items.len() as Weight
    }
}

impl<T> Sink<T> for Queue<T> {
    fn put(&mut self, tracker: &Tracker, item: T) {
        self.push_in(tracker, item);
    }
}
