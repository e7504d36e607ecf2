//! Repeated, seeded runs of one strategy over one lexicon.

use cogseq_core::{Complexity, Context, Lexicon, Sequence};
use cogseq_types::{Attribute, CogError, Weight};
use serde::Serialize;

use crate::bias::{BiasPolicy, FixedBias, TwoValuePolicy};
use crate::strategies::Strategy;

#[derive(Debug, Clone)]
pub struct Experiment {
    pub strategy: Strategy,
    /// Template copied afresh for every run.
    pub lexicon: Lexicon,
    pub runs: usize,
    pub seed: u64,
    /// Fixed bias; `None` selects the two-value policy.
    pub bias: Option<Attribute>,
}

impl Experiment {
    #[must_use]
    pub fn new(strategy: Strategy, lexicon: Lexicon) -> Self {
        Self {
            strategy,
            lexicon,
            runs: 1,
            seed: cogseq_core::DEFAULT_SEED,
            bias: None,
        }
    }

    #[must_use]
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_bias(mut self, bias: Option<Attribute>) -> Self {
        self.bias = bias;
        self
    }

    /// Run the strategy `runs` times under one seeded context.
    ///
    /// Stops at the first failing run.
    pub fn run(&self) -> Result<ExperimentReport, CogError> {
        let policy: Box<dyn BiasPolicy> = match self.bias {
            Some(attribute) => Box::new(FixedBias(attribute)),
            None => Box::new(TwoValuePolicy),
        };
        let mut ctx = Context::seeded(self.seed);
        let mut report = ExperimentReport {
            strategy: self.strategy,
            seed: self.seed,
            sequences: Vec::with_capacity(self.runs),
            complexity: Complexity::new(),
        };
        for run in 0..self.runs {
            let mut lexicon = self.lexicon.clone();
            let (sequence, history) = self.strategy.run(&mut ctx, &mut lexicon, policy.as_ref())?;
            tracing::debug!(
                strategy = self.strategy.name(),
                run,
                mdl = history.total_mdl(),
                "run finished"
            );
            report.sequences.push(sequence);
            report.complexity.absorb(history);
        }
        tracing::info!(
            strategy = self.strategy.name(),
            runs = self.runs,
            total_mdl = report.complexity.total_mdl(),
            peak_space = report.complexity.peak_space(),
            "experiment finished"
        );
        Ok(report)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    pub strategy: Strategy,
    pub seed: u64,
    pub sequences: Vec<Sequence>,
    pub complexity: Complexity,
}

impl ExperimentReport {
    #[must_use]
    pub fn runs(&self) -> usize {
        self.complexity.len()
    }

    /// Average description length per run, 0 for an empty report.
    #[must_use]
    pub fn mean_mdl(&self) -> f64 {
        if self.complexity.is_empty() {
            return 0.0;
        }
        self.complexity.total_mdl() as f64 / self.complexity.len() as f64
    }

    #[must_use]
    pub fn total_mdl(&self) -> Weight {
        self.complexity.total_mdl()
    }
}
