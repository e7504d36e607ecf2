use serde::{Deserialize, Serialize};

use cogseq_types::Token;

use super::Sink;
use crate::complexity::Tracker;

/// The externally observable output of a run.
///
/// Not `Trackable`: the produced sequence is the answer rather than working
/// memory and never contributes to peak space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence<T = Token> {
    items: Vec<T>,
}

impl<T> Sequence<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn click(&mut self, item: T) {
        self.items.push(item);
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
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl Sequence<Token> {
    /// Token names in output order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|t| t.name().as_str()).collect()
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Sink<T> for Sequence<T> {
    fn put(&mut self, _tracker: &Tracker, item: T) {
        self.click(item);
    }
}
