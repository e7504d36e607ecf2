//! Cognitive sequence strategies and the experiment runner.
//!
//! Strategies are plain functions over a [`Context`](cogseq_core::Context)
//! and a [`Lexicon`](cogseq_core::Lexicon); [`Strategy::run`] wraps one in
//! the measuring harness.

pub mod bias;
mod experiment;
pub mod strategies;

pub use bias::{BiasPolicy, FixedBias, TwoValuePolicy};
pub use experiment::{Experiment, ExperimentReport};
pub use strategies::{Dimension, Strategy, UnknownStrategy};
