//! Every strategy over the catalog lexicons it can organize

use std::collections::BTreeSet;

use cogseq_core::Context;
use cogseq_engine::{Dimension, Experiment, Strategy, TwoValuePolicy};

use crate::common::catalog_lexicon;

fn lexicons_for(strategy: Strategy) -> &'static [&'static str] {
    match strategy {
        Strategy::Chaining | Strategy::Ordinal => &["chain4", "ordinal4", "lex1", "lex5"],
        // three classes of two can strand the last pair
        Strategy::Alternate => &["lex1", "lex2", "lex4", "lex5", "lex6"],
        _ if strategy.dimension() == Dimension::One => {
            &["lex1", "lex2", "lex3", "lex4", "lex5", "lex6"]
        }
        _ => &["lex4", "lex5", "lex6"],
    }
}

#[test]
fn every_strategy_emits_each_token_exactly_once() {
    for strategy in Strategy::ALL {
        for name in lexicons_for(strategy) {
            for seed in 0..5 {
                let mut ctx = Context::seeded(seed);
                let mut lexicon = catalog_lexicon(name);
                let expected: BTreeSet<String> =
                    lexicon.iter().map(|t| t.name().to_string()).collect();
                let (sequence, history) = strategy
                    .run(&mut ctx, &mut lexicon, &TwoValuePolicy)
                    .unwrap_or_else(|e| panic!("{strategy} on {name}, seed {seed}: {e}"));

                let emitted: Vec<String> =
                    sequence.iter().map(|t| t.name().to_string()).collect();
                let distinct: BTreeSet<String> = emitted.iter().cloned().collect();
                assert_eq!(emitted.len(), expected.len(), "{strategy} on {name}");
                assert_eq!(distinct, expected, "{strategy} on {name}");
                assert!(lexicon.is_empty(), "{strategy} on {name}");

                let snapshot = history.last().unwrap();
                assert_eq!(snapshot.label, strategy.name());
                assert!(snapshot.peak_space > 0);
                assert!(!ctx.tracker().is_active());
            }
        }
    }
}

#[test]
fn default_lexicons_exist_in_the_catalog() {
    for strategy in Strategy::ALL {
        let report = Experiment::new(strategy, catalog_lexicon(strategy.default_lexicon()))
            .with_runs(2)
            .run()
            .unwrap();
        assert_eq!(report.runs(), 2, "{strategy}");
        assert_eq!(report.sequences.len(), 2);
    }
}

#[test]
fn chaining_on_chain4_is_free_of_choice() {
    let report = Experiment::new(Strategy::Chaining, catalog_lexicon("chain4"))
        .with_runs(4)
        .with_seed(99)
        .run()
        .unwrap();
    for sequence in &report.sequences {
        assert_eq!(sequence.names(), vec!["A", "B", "C", "D"]);
    }
}

#[test]
fn ordinal_on_ordinal4_follows_the_ordinates() {
    let report = Experiment::new(Strategy::Ordinal, catalog_lexicon("ordinal4"))
        .run()
        .unwrap();
    assert_eq!(report.sequences[0].names(), vec!["W", "X", "Y", "Z"]);
}

#[test]
fn runs_of_one_experiment_differ_but_repeat_under_the_seed() {
    let run = || {
        Experiment::new(Strategy::Iterate, catalog_lexicon("lex3"))
            .with_runs(6)
            .with_seed(7)
            .run()
            .unwrap()
    };
    let a = run();
    let b = run();
    let names = |r: &cogseq_engine::ExperimentReport| -> Vec<Vec<String>> {
        r.sequences
            .iter()
            .map(|s| s.iter().map(|t| t.name().to_string()).collect())
            .collect()
    };
    assert_eq!(names(&a), names(&b));
    assert_eq!(a.complexity, b.complexity);
    assert_eq!(a.total_mdl(), b.complexity.total_mdl());
}
