//! Complexity accounting: what a run cost and how much it had to hold.
//!
//! ```text
//! Tracker (stack) ── current ──> RunScope ─┬─ Space   (live weights, peak)
//!                                          └─ Ledger  (calls, cost)
//!                   close ──> RunSnapshot ──> Complexity (history)
//! ```

mod ledger;
mod scope;
mod snapshot;
mod space;

pub use ledger::Ledger;
pub use scope::{RunScope, Tracker};
pub use snapshot::{Complexity, RunSnapshot};
pub use space::Space;
