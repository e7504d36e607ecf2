//! The explicit handle every primitive and strategy runs against.
//!
//! A [`Context`] owns the scope [`Tracker`] and the seeded random source. It
//! is passed down the call stack instead of living in a global, and
//! [`Context::measure`] / [`Context::enter`] give the ambient-scope ergonomics
//! through RAII.

use std::ops::{Deref, DerefMut};

use rand::SeedableRng;
use rand::distr::{Distribution, StandardUniform, Uniform};
use rand::rngs::StdRng;

use cogseq_types::{Probability, Weight};

use crate::complexity::{Complexity, RunScope, RunSnapshot, Tracker};
use crate::memory::Trackable;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

pub struct Context {
    tracker: Tracker,
    rng: StdRng,
    seed: u64,
}

impl Context {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            tracker: Tracker::new(),
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Attribute one primitive call to the current scope.
    pub(crate) fn record(&mut self, primitive: &str, weight: Weight) {
        self.tracker.record(primitive, weight);
    }

    /// Register `structure` with the current scope and hand it back.
    pub fn track<T: Trackable>(&self, structure: T) -> T {
        self.register(&structure);
        structure
    }

    pub fn register<T: Trackable + ?Sized>(&self, structure: &T) {
        self.tracker
            .register(structure.structure_id(), structure.compute_weight());
    }

    pub fn purge<T: Trackable + ?Sized>(&self, structure: &T) {
        self.tracker.purge(structure.structure_id());
    }

    /// Purge `structure` from the current scope and drop it.
    pub fn release<T: Trackable>(&self, structure: T) {
        self.purge(&structure);
    }

    /// Open a run scope that stays current until the guard is closed or
    /// dropped.
    pub fn enter(&mut self, label: impl Into<String>) -> ScopeGuard<'_> {
        let label = label.into();
        let depth = self.tracker.push(RunScope::new(label.clone()));
        tracing::debug!(label = %label, depth, "run scope opened");
        ScopeGuard {
            ctx: self,
            depth,
            closed: false,
        }
    }

    /// Run `body` inside a fresh scope.
    ///
    /// On success the scope's snapshot is appended to `history`. On error the
    /// previous scope is restored and nothing is appended.
    pub fn measure<T, E, F>(
        &mut self,
        label: impl Into<String>,
        history: &mut Complexity,
        body: F,
    ) -> Result<T, E>
    where
        F: FnOnce(&mut Context) -> Result<T, E>,
    {
        let mut guard = self.enter(label);
        let value = body(&mut *guard)?;
        history.push(guard.close());
        Ok(value)
    }

    /// A uniformly random index below `len`, or `None` when `len` is zero.
    pub(crate) fn choose_index(&mut self, len: usize) -> Option<usize> {
        let range = Uniform::new(0, len).ok()?;
        Some(range.sample(&mut self.rng))
    }

    pub(crate) fn coin(&mut self, p: Probability) -> bool {
        let draw: f64 = StandardUniform.sample(&mut self.rng);
        draw < p.value()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("seed", &self.seed)
            .field("depth", &self.tracker.depth())
            .finish_non_exhaustive()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::seeded(DEFAULT_SEED)
    }
}

/// Keeps one run scope current for its lifetime.
///
/// Dereferences to the [`Context`], so the guarded code keeps using the same
/// handle. Dropping the guard without [`ScopeGuard::close`] discards the
/// scope; that is the path taken on early return and unwinding.
pub struct ScopeGuard<'a> {
    ctx: &'a mut Context,
    depth: usize,
    closed: bool,
}

impl ScopeGuard<'_> {
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Close the scope and summarize it.
    pub fn close(mut self) -> RunSnapshot {
        self.closed = true;
        let snapshot = self
            .pop_own()
            .map(|scope| scope.snapshot())
            .unwrap_or_default();
        tracing::debug!(
            label = %snapshot.label,
            mdl = snapshot.mdl,
            peak_space = snapshot.peak_space,
            "run scope closed"
        );
        snapshot
    }

    // Scopes left open above this one are discarded first.
    fn pop_own(&mut self) -> Option<RunScope> {
        while self.ctx.tracker.depth() > self.depth {
            if let Some(stray) = self.ctx.tracker.pop() {
                tracing::warn!(label = %stray.label(), "discarding unclosed inner scope");
            }
        }
        if self.ctx.tracker.depth() == self.depth {
            self.ctx.tracker.pop()
        } else {
            None
        }
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = Context;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Some(scope) = self.pop_own() {
            tracing::debug!(label = %scope.label(), "run scope abandoned");
        }
    }
}
