//! End-to-end runs with exactly known accounting

use cogseq_core::primitives::sample;
use cogseq_core::{Context, Lexicon};
use cogseq_engine::{Experiment, FixedBias, Strategy, TwoValuePolicy};
use cogseq_types::{Attribute, Token};

use crate::common::{measured, two_by_two};

fn colors(sequence: &cogseq_core::Sequence) -> Vec<String> {
    sequence
        .iter()
        .map(|t| t.attribute(Attribute::First).unwrap().to_string())
        .collect()
}

#[test]
fn alternate_on_a_balanced_pair_costs_four_samples_and_four_removes() {
    for seed in 0..8 {
        let mut ctx = Context::seeded(seed);
        let mut lexicon = two_by_two();
        let (sequence, history) = Strategy::Alternate
            .run(&mut ctx, &mut lexicon, &TwoValuePolicy)
            .unwrap();
        let values = colors(&sequence);
        assert_eq!(values.len(), 4);
        assert!(values.windows(2).all(|w| w[0] != w[1]), "seed {seed}: {values:?}");

        let snapshot = history.last().unwrap();
        assert_eq!(snapshot.calls("sample"), 4);
        assert_eq!(snapshot.calls("remove"), 4);
        assert!(lexicon.is_empty());
    }
}

#[test]
fn palindrome_on_two_by_two_mirrors_the_bias() {
    for seed in 0..8 {
        let report = Experiment::new(Strategy::Palindrome, two_by_two())
            .with_seed(seed)
            .with_bias(Some(Attribute::First))
            .run()
            .unwrap();
        let values = colors(&report.sequences[0]);
        assert_eq!(values.len(), 4);
        for i in 0..4 {
            assert_eq!(values[i], values[3 - i], "seed {seed}: {values:?}");
        }
    }
}

#[test]
fn sampling_a_single_token_is_free() {
    let mut ctx = Context::default();
    let lexicon = Lexicon::new([Token::new("A").with_attribute1("red")]);
    let (token, snapshot) = measured(&mut ctx, "forced", |ctx| sample(ctx, &lexicon));
    assert_eq!(token.name().as_str(), "A");
    assert_eq!(snapshot.calls("sample"), 1);
    assert_eq!(snapshot.mdl, 0);
}

#[test]
fn failing_on_an_empty_lexicon_leaves_no_scope_behind() {
    let mut ctx = Context::default();
    for strategy in [
        Strategy::Alternate,
        Strategy::SerialCrossed,
        Strategy::CenterEmbedded,
    ] {
        let err = strategy
            .run(&mut ctx, &mut Lexicon::empty(), &TwoValuePolicy)
            .unwrap_err();
        assert_eq!(err.kind(), "empty_collection", "{strategy}");
        assert!(!ctx.tracker().is_active(), "{strategy}");
    }

    // the next run sees none of the failed runs' calls
    let (sequence, history) = Strategy::Iterate
        .run(&mut ctx, &mut two_by_two(), &FixedBias(Attribute::First))
        .unwrap();
    assert_eq!(sequence.len(), 4);
    assert_eq!(history.len(), 1);
    let snapshot = history.last().unwrap();
    assert_eq!(snapshot.label, "iterate");
    assert_eq!(snapshot.calls("flip"), 0);
    assert_eq!(snapshot.calls("pick"), 0);
}

#[test]
fn experiment_stops_at_a_failing_run() {
    let result = Experiment::new(Strategy::Alternate, Lexicon::empty())
        .with_runs(3)
        .run();
    assert_eq!(result.unwrap_err().kind(), "empty_collection");
}
