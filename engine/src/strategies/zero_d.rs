//! Strategies that order tokens by relations alone, without a bias.

use cogseq_core::primitives::{Criterion, find, loop_step, remove, sample};
use cogseq_core::{Context, Lexicon, Sequence};
use cogseq_types::{CogError, Token};

use super::emit;
use crate::bias::BiasPolicy;

/// Follow successor links from a head until the chain ends, then start over
/// from another head. On a cycle with no head left, any token restarts it.
pub fn chaining(
    ctx: &mut Context,
    lexicon: &mut Lexicon,
    _policy: &dyn BiasPolicy,
) -> Result<Sequence, CogError> {
    let mut sequence = Sequence::new();
    // successors of the last emitted token, found while it was still present
    let mut pending: Option<Lexicon> = None;
    while !lexicon.is_empty() {
        loop_step(ctx);
        let current = match pending.take() {
            Some(next) if !next.is_empty() => {
                let token = sample(ctx, &next)?;
                ctx.release(next);
                token
            }
            stale => {
                if let Some(next) = stale {
                    ctx.release(next);
                }
                start_chain(ctx, lexicon)?
            }
        };
        let mut successors = find(ctx, lexicon, &Criterion::SuccessorOf(&current))?;
        if successors.contains(&current) {
            remove(ctx, &mut successors, &current)?;
        }
        emit(ctx, lexicon, &mut sequence, &current)?;
        pending = Some(successors);
    }
    if let Some(next) = pending {
        ctx.release(next);
    }
    Ok(sequence)
}

fn start_chain(ctx: &mut Context, lexicon: &Lexicon) -> Result<Token, CogError> {
    let heads = find(ctx, lexicon, &Criterion::Heads)?;
    let token = if heads.is_empty() {
        sample(ctx, lexicon)?
    } else {
        sample(ctx, &heads)?
    };
    ctx.release(heads);
    Ok(token)
}

/// Emit tokens by ascending ordinate. Tokens without one come last, in
/// random order.
pub fn ordinal(
    ctx: &mut Context,
    lexicon: &mut Lexicon,
    _policy: &dyn BiasPolicy,
) -> Result<Sequence, CogError> {
    let mut sequence = Sequence::new();
    while !lexicon.is_empty() {
        loop_step(ctx);
        let lowest = find(ctx, lexicon, &Criterion::LowestOrdinate)?;
        let current = if lowest.is_empty() {
            sample(ctx, lexicon)?
        } else {
            sample(ctx, &lowest)?
        };
        ctx.release(lowest);
        emit(ctx, lexicon, &mut sequence, &current)?;
    }
    Ok(sequence)
}
