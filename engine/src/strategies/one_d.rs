//! Strategies organized around a single bias attribute.

use cogseq_core::primitives::{Criterion, add, find, loop_step, sample, write_all};
use cogseq_core::{Context, Lexicon, List, Queue, Sequence, Sink};
use cogseq_types::{Attribute, CogError, Token};

use super::{drain, emit, mirror_pass, rotate_pass};
use crate::bias::BiasPolicy;

/// Emit a token, then its whole bias class, class after class.
pub fn iterate(
    ctx: &mut Context,
    lexicon: &mut Lexicon,
    policy: &dyn BiasPolicy,
) -> Result<Sequence, CogError> {
    let bias = policy.choose(ctx, lexicon);
    let mut sequence = Sequence::new();
    while !lexicon.is_empty() {
        let current = sample(ctx, lexicon)?;
        emit(ctx, lexicon, &mut sequence, &current)?;
        write_all(ctx, lexicon, &mut sequence, &Criterion::like(&current, bias))?;
    }
    Ok(sequence)
}

/// One representative per bias class, then the buffered rest of each class
/// in reverse class order.
pub fn palindrome(
    ctx: &mut Context,
    lexicon: &mut Lexicon,
    policy: &dyn BiasPolicy,
) -> Result<Sequence, CogError> {
    let bias = policy.choose(ctx, lexicon);
    let mut sequence = Sequence::new();
    let mut basis = ctx.track(List::new());
    let mut buffer = ctx.track(lexicon.sibling(Vec::new()));
    split_classes(ctx, lexicon, bias, &mut sequence, &mut basis, &mut buffer)?;
    drain(ctx, &mut buffer, &mut sequence, |ctx, source, sequence| {
        mirror_pass(ctx, &basis, source, sequence, bias)
    })?;
    ctx.release(buffer);
    ctx.release(basis);
    Ok(sequence)
}

/// Each token differs from the one before it on the bias attribute.
///
/// Fails with `EmptyCollection` once no remaining token differs from the
/// last one emitted.
pub fn alternate(
    ctx: &mut Context,
    lexicon: &mut Lexicon,
    policy: &dyn BiasPolicy,
) -> Result<Sequence, CogError> {
    let bias = policy.choose(ctx, lexicon);
    let mut sequence = Sequence::new();
    let mut previous = sample(ctx, lexicon)?;
    emit(ctx, lexicon, &mut sequence, &previous)?;
    while !lexicon.is_empty() {
        loop_step(ctx);
        let candidates = find(ctx, lexicon, &Criterion::unlike(&previous, bias))?;
        let current = sample(ctx, &candidates)?;
        ctx.release(candidates);
        emit(ctx, lexicon, &mut sequence, &current)?;
        previous = current;
    }
    Ok(sequence)
}

/// One representative per bias class, then the buffered rest repeating the
/// classes in that same order.
pub fn seriate(
    ctx: &mut Context,
    lexicon: &mut Lexicon,
    policy: &dyn BiasPolicy,
) -> Result<Sequence, CogError> {
    let bias = policy.choose(ctx, lexicon);
    let mut sequence = Sequence::new();
    let mut basis = ctx.track(Queue::new());
    let mut buffer = ctx.track(lexicon.sibling(Vec::new()));
    split_classes(ctx, lexicon, bias, &mut sequence, &mut basis, &mut buffer)?;
    drain(ctx, &mut buffer, &mut sequence, |ctx, source, sequence| {
        rotate_pass(ctx, &mut basis, source, sequence, bias)
    })?;
    ctx.release(buffer);
    ctx.release(basis);
    Ok(sequence)
}

// Emit one token per bias class, keep it in `basis`, and set the rest of its
// class aside in `buffer`.
fn split_classes<B: Sink<Token>>(
    ctx: &mut Context,
    lexicon: &mut Lexicon,
    bias: Attribute,
    sequence: &mut Sequence,
    basis: &mut B,
    buffer: &mut Lexicon,
) -> Result<(), CogError> {
    while !lexicon.is_empty() {
        loop_step(ctx);
        let current = sample(ctx, lexicon)?;
        emit(ctx, lexicon, sequence, &current)?;
        add(ctx, basis, current.clone());
        write_all(ctx, lexicon, buffer, &Criterion::like(&current, bias))?;
    }
    Ok(())
}
