//! The cognitive strategies and their registry.
//!
//! Every strategy drains its lexicon: on success the lexicon is empty and
//! each input token appears in the sequence exactly once. Loops that write
//! from a basis fall back to sampling a token directly after a pass that
//! wrote nothing, so they always make progress.

mod one_d;
mod two_d;
mod zero_d;

use std::fmt;
use std::str::FromStr;

use cogseq_core::primitives::{Criterion, add, loop_step, push_out, remove, sample, write_random};
use cogseq_core::{Complexity, Context, Lexicon, List, Queue, Sequence, cognitive_function};
use cogseq_types::{Attribute, CogError, Token};
use serde::{Deserialize, Serialize};

use crate::bias::BiasPolicy;

pub use one_d::{alternate, iterate, palindrome, seriate};
pub use two_d::{center_embedded, serial_crossed, tail_recursive};
pub use zero_d::{chaining, ordinal};

type Body = fn(&mut Context, &mut Lexicon, &dyn BiasPolicy) -> Result<Sequence, CogError>;

/// How many attributes a strategy organizes tokens by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Zero,
    One,
    Two,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Dimension::Zero => "0-D",
            Dimension::One => "1-D",
            Dimension::Two => "2-D",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Chaining,
    Ordinal,
    Iterate,
    Palindrome,
    Alternate,
    Seriate,
    SerialCrossed,
    CenterEmbedded,
    TailRecursive,
}

impl Strategy {
    pub const ALL: [Strategy; 9] = [
        Strategy::Chaining,
        Strategy::Ordinal,
        Strategy::Iterate,
        Strategy::Palindrome,
        Strategy::Alternate,
        Strategy::Seriate,
        Strategy::SerialCrossed,
        Strategy::CenterEmbedded,
        Strategy::TailRecursive,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Chaining => "chaining",
            Strategy::Ordinal => "ordinal",
            Strategy::Iterate => "iterate",
            Strategy::Palindrome => "palindrome",
            Strategy::Alternate => "alternate",
            Strategy::Seriate => "seriate",
            Strategy::SerialCrossed => "serial_crossed",
            Strategy::CenterEmbedded => "center_embedded",
            Strategy::TailRecursive => "tail_recursive",
        }
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|s| s.name() == normalized)
    }

    #[must_use]
    pub const fn dimension(self) -> Dimension {
        match self {
            Strategy::Chaining | Strategy::Ordinal => Dimension::Zero,
            Strategy::Iterate | Strategy::Palindrome | Strategy::Alternate | Strategy::Seriate => {
                Dimension::One
            }
            Strategy::SerialCrossed | Strategy::CenterEmbedded | Strategy::TailRecursive => {
                Dimension::Two
            }
        }
    }

    /// Catalog lexicon a run uses when none is named.
    #[must_use]
    pub const fn default_lexicon(self) -> &'static str {
        match self {
            Strategy::Chaining => "chain4",
            Strategy::Ordinal => "ordinal4",
            Strategy::Iterate | Strategy::Palindrome | Strategy::Alternate | Strategy::Seriate => {
                "lex1"
            }
            Strategy::SerialCrossed | Strategy::CenterEmbedded | Strategy::TailRecursive => "lex4",
        }
    }

    fn body(self) -> Body {
        match self {
            Strategy::Chaining => chaining,
            Strategy::Ordinal => ordinal,
            Strategy::Iterate => iterate,
            Strategy::Palindrome => palindrome,
            Strategy::Alternate => alternate,
            Strategy::Seriate => seriate,
            Strategy::SerialCrossed => serial_crossed,
            Strategy::CenterEmbedded => center_embedded,
            Strategy::TailRecursive => tail_recursive,
        }
    }

    /// Run the strategy once as a measured cognitive function.
    pub fn run(
        self,
        ctx: &mut Context,
        lexicon: &mut Lexicon,
        policy: &dyn BiasPolicy,
    ) -> Result<(Sequence, Complexity), CogError> {
        let body = self.body();
        tracing::debug!(strategy = self.name(), tokens = lexicon.len(), "running strategy");
        cognitive_function(self.name(), |ctx: &mut Context, lexicon: &mut Lexicon| {
            body(ctx, lexicon, policy)
        })
        .call(ctx, lexicon)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy `{0}`")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

// ============================================================================
// Shared steps
// ============================================================================

/// Take `token` out of `lexicon`, release it from working memory and append
/// it to `sequence`.
fn emit(
    ctx: &mut Context,
    lexicon: &mut Lexicon,
    sequence: &mut Sequence,
    token: &Token,
) -> Result<(), CogError> {
    remove(ctx, lexicon, token)?;
    ctx.purge(token);
    sequence.click(token.clone());
    Ok(())
}

/// Repeat `pass` until `source` is empty. A pass that writes nothing is
/// followed by one directly sampled token.
fn drain<P>(
    ctx: &mut Context,
    source: &mut Lexicon,
    sequence: &mut Sequence,
    mut pass: P,
) -> Result<(), CogError>
where
    P: FnMut(&mut Context, &mut Lexicon, &mut Sequence) -> Result<bool, CogError>,
{
    while !source.is_empty() {
        if !pass(ctx, source, sequence)? && !source.is_empty() {
            tracing::trace!(remaining = source.len(), "pass wrote nothing, sampling directly");
            let token = sample(ctx, source)?;
            emit(ctx, source, sequence, &token)?;
        }
    }
    Ok(())
}

/// Walk the basis front to back, rotating it, writing one token like each
/// base on `bias`. Returns whether anything was written.
fn rotate_pass(
    ctx: &mut Context,
    basis: &mut Queue<Token>,
    source: &mut Lexicon,
    sequence: &mut Sequence,
    bias: Attribute,
) -> Result<bool, CogError> {
    let mut written = false;
    for _ in 0..basis.len() {
        if source.is_empty() {
            break;
        }
        loop_step(ctx);
        let base = push_out(ctx, basis)?;
        if write_random(ctx, source, sequence, &Criterion::like(&base, bias))?.is_some() {
            written = true;
        }
        add(ctx, basis, base);
    }
    Ok(written)
}

/// Walk the basis back to front, writing one token like each base on
/// `bias`. Returns whether anything was written.
fn mirror_pass(
    ctx: &mut Context,
    basis: &List<Token>,
    source: &mut Lexicon,
    sequence: &mut Sequence,
    bias: Attribute,
) -> Result<bool, CogError> {
    let mut written = false;
    for base in basis.iter().rev() {
        if source.is_empty() {
            break;
        }
        loop_step(ctx);
        if write_random(ctx, source, sequence, &Criterion::like(base, bias))?.is_some() {
            written = true;
        }
    }
    Ok(written)
}
