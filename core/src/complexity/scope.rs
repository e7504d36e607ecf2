//! Run scopes and the explicit stack that decides which one is current.

use cogseq_types::{StructureId, Weight};

use super::{Ledger, RunSnapshot, Space};

/// One measured execution: a space tracker and a ledger, bound together.
#[derive(Debug, Default)]
pub struct RunScope {
    label: String,
    space: Space,
    ledger: Ledger,
}

impl RunScope {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            space: Space::new(),
            ledger: Ledger::new(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn space(&self) -> &Space {
        &self.space
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    #[must_use]
    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            label: self.label.clone(),
            mdl: self.ledger.total(),
            breakdown: self.ledger.counts(),
            peak_space: self.space.max_seen(),
        }
    }
}

/// Stack of active run scopes. The top of the stack is the current scope.
///
/// Every method that reports into a scope is a no-op when the stack is
/// empty, so structures and primitives work outside a measured run.
#[derive(Debug, Default)]
pub struct Tracker {
    stack: Vec<RunScope>,
}

impl Tracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `scope` current, shadowing the previous one. Returns the new depth.
    pub fn push(&mut self, scope: RunScope) -> usize {
        self.stack.push(scope);
        self.stack.len()
    }

    /// Close the current scope, making the previous one current again.
    pub fn pop(&mut self) -> Option<RunScope> {
        self.stack.pop()
    }

    #[must_use]
    pub fn current(&self) -> Option<&RunScope> {
        self.stack.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut RunScope> {
        self.stack.last_mut()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn register(&self, id: StructureId, weight: Weight) {
        if let Some(scope) = self.current() {
            scope.space.register(id, weight);
        }
    }

    pub fn update(&self, id: StructureId, weight: Weight) {
        if let Some(scope) = self.current() {
            scope.space.update(id, weight);
        }
    }

    pub fn purge(&self, id: StructureId) {
        if let Some(scope) = self.current() {
            scope.space.purge(id);
        }
    }

    pub fn record(&mut self, name: &str, weight: Weight) {
        if let Some(scope) = self.current_mut() {
            tracing::trace!(primitive = name, weight, scope = %scope.label, "primitive recorded");
            scope.ledger.record(name, weight);
        }
    }
}
