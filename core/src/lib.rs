//! Complexity-accounting runtime for cognitive sequence strategies.
//!
//! A strategy manipulates memory structures only through the primitives in
//! [`primitives`]. Each primitive reports a weighted entry to the current run
//! scope, and every tracked structure keeps the scope's space table current
//! as it changes. Wrapping a strategy with [`cognitive_function`] measures
//! each call and hands back its [`Complexity`].

pub mod complexity;
mod context;
mod harness;
pub mod memory;
pub mod primitives;

// ============================================================================
// Accounting
// ============================================================================

pub use complexity::{Complexity, Ledger, RunScope, RunSnapshot, Space, Tracker};
pub use context::{Context, DEFAULT_SEED, ScopeGuard};
pub use harness::{CognitiveFunction, Operands, cognitive_function};

// ============================================================================
// Memory structures
// ============================================================================

pub use memory::{Layout, Lexicon, LexiconGraph, List, Mode, Pair, Queue, Sequence, Sink, Trackable};

// ============================================================================
// Primitives
// ============================================================================

pub use primitives::{Criterion, Primitive};
