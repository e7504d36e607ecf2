//! Strategies over tokens with two attributes: one bias groups, the other
//! orders.
//!
//! The primary bias is drawn with `pick`, so every run pays one flip for it.

use cogseq_core::primitives::{
    Criterion, add, find_and_move, loop_step, merge, pick, remove, sample, write_random,
};
use cogseq_core::{Context, Lexicon, List, Mode, Queue, Sequence, Sink};
use cogseq_types::{Attribute, CogError, Probability, Token};

use super::{drain, emit, mirror_pass, rotate_pass};
use crate::bias::BiasPolicy;

fn choose_biases(ctx: &mut Context) -> (Mode<Attribute>, Mode<Attribute>) {
    let primary = pick(ctx, Attribute::First, Attribute::Second, Probability::HALF);
    let secondary = ctx.track(Mode::new(primary.get().other()));
    (primary, secondary)
}

/// A leading class on the primary bias, then the rest matched to it member
/// by member on the secondary bias, in the same order each pass.
pub fn serial_crossed(
    ctx: &mut Context,
    lexicon: &mut Lexicon,
    _policy: &dyn BiasPolicy,
) -> Result<Sequence, CogError> {
    let (primary, secondary) = choose_biases(ctx);
    let bias = *secondary.get();
    let mut sequence = Sequence::new();
    let mut basis = ctx.track(Queue::new());
    lead_class(ctx, lexicon, *primary.get(), &mut sequence, &mut basis)?;
    drain(ctx, lexicon, &mut sequence, |ctx, source, sequence| {
        rotate_pass(ctx, &mut basis, source, sequence, bias)
    })?;
    ctx.release(basis);
    ctx.release(secondary);
    ctx.release(primary);
    Ok(sequence)
}

/// As [`serial_crossed`], but each pass walks the leading class backwards,
/// so the second half mirrors the first.
pub fn center_embedded(
    ctx: &mut Context,
    lexicon: &mut Lexicon,
    _policy: &dyn BiasPolicy,
) -> Result<Sequence, CogError> {
    let (primary, secondary) = choose_biases(ctx);
    let bias = *secondary.get();
    let mut sequence = Sequence::new();
    let mut basis = ctx.track(List::new());
    lead_class(ctx, lexicon, *primary.get(), &mut sequence, &mut basis)?;
    drain(ctx, lexicon, &mut sequence, |ctx, source, sequence| {
        mirror_pass(ctx, &basis, source, sequence, bias)
    })?;
    ctx.release(basis);
    ctx.release(secondary);
    ctx.release(primary);
    Ok(sequence)
}

/// Head-tail pairs: each sampled head is followed by a partner of its
/// primary-bias class. A head with no partner left stands alone.
pub fn tail_recursive(
    ctx: &mut Context,
    lexicon: &mut Lexicon,
    _policy: &dyn BiasPolicy,
) -> Result<Sequence, CogError> {
    let primary = pick(ctx, Attribute::First, Attribute::Second, Probability::HALF);
    let bias = *primary.get();
    let mut sequence = Sequence::new();
    let mut scratch = ctx.track(List::new());
    while !lexicon.is_empty() {
        loop_step(ctx);
        let head = sample(ctx, lexicon)?;
        remove(ctx, lexicon, &head)?;
        let partner = write_random(ctx, lexicon, &mut scratch, &Criterion::like(&head, bias))?;
        ctx.purge(&head);
        match partner {
            Some(tail) => {
                scratch.clear(ctx.tracker());
                let pair = merge(ctx, head, tail);
                ctx.purge(&pair);
                let (head, tail) = pair.into_parts();
                sequence.click(head);
                sequence.click(tail);
            }
            None => sequence.click(head),
        }
    }
    ctx.release(scratch);
    ctx.release(primary);
    Ok(sequence)
}

// Emit a sampled token and its whole class on `bias`, recording each in
// `basis` in emission order.
fn lead_class<B: Sink<Token>>(
    ctx: &mut Context,
    lexicon: &mut Lexicon,
    bias: Attribute,
    sequence: &mut Sequence,
    basis: &mut B,
) -> Result<(), CogError> {
    let current = sample(ctx, lexicon)?;
    emit(ctx, lexicon, sequence, &current)?;
    add(ctx, basis, current.clone());
    let mut class = find_and_move(ctx, lexicon, &Criterion::like(&current, bias))?;
    while !class.is_empty() {
        loop_step(ctx);
        let member = sample(ctx, &class)?;
        emit(ctx, &mut class, sequence, &member)?;
        add(ctx, basis, member);
    }
    ctx.release(class);
    Ok(())
}
