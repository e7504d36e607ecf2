//! The fixed vocabulary of elementary memory actions.
//!
//! Each primitive performs one action and then reports its name and weight
//! to the current run scope. Outside a measured run the report is dropped,
//! so primitives can also be used for setup.
//!
//! Weight convention:
//!
//! | primitive          | weight                                      |
//! |--------------------|---------------------------------------------|
//! | `sample`           | 1, or 0 when only one candidate existed     |
//! | `add`, `remove`    | 1                                           |
//! | `flip`             | 1                                           |
//! | `pick`             | 0 (its inner `flip` carries the cost)       |
//! | `inquire`          | 1                                           |
//! | `check_similarity` | 1                                           |
//! | `find`             | 1 + number of matches                       |
//! | `write_random`     | 0 (its constituent primitives carry the cost) |
//! | `write_all`        | 0 (likewise)                                |
//! | `merge`            | 0 (packages elements already chosen)        |
//! | `loop`             | 1                                           |
//! | `push_out`         | 1                                           |

use cogseq_types::{AttrValue, Attribute, CogError, Probability, Token, Weight};

use crate::context::Context;
use crate::memory::{Lexicon, Mode, Pair, Queue, Sink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Sample,
    Add,
    Remove,
    Flip,
    Pick,
    Inquire,
    CheckSimilarity,
    Find,
    WriteRandom,
    WriteAll,
    Merge,
    Loop,
    PushOut,
}

impl Primitive {
    pub const ALL: [Primitive; 13] = [
        Primitive::Sample,
        Primitive::Add,
        Primitive::Remove,
        Primitive::Flip,
        Primitive::Pick,
        Primitive::Inquire,
        Primitive::CheckSimilarity,
        Primitive::Find,
        Primitive::WriteRandom,
        Primitive::WriteAll,
        Primitive::Merge,
        Primitive::Loop,
        Primitive::PushOut,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Primitive::Sample => "sample",
            Primitive::Add => "add",
            Primitive::Remove => "remove",
            Primitive::Flip => "flip",
            Primitive::Pick => "pick",
            Primitive::Inquire => "inquire",
            Primitive::CheckSimilarity => "check_similarity",
            Primitive::Find => "find",
            Primitive::WriteRandom => "write_random",
            Primitive::WriteAll => "write_all",
            Primitive::Merge => "merge",
            Primitive::Loop => "loop",
            Primitive::PushOut => "push_out",
        }
    }
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn report(ctx: &mut Context, primitive: Primitive, weight: Weight) {
    ctx.record(primitive.as_str(), weight);
}

/// What `find` searches a lexicon for.
#[derive(Debug, Clone, Copy)]
pub enum Criterion<'a> {
    /// Tokens whose `attribute` equals `value`.
    Value {
        attribute: Attribute,
        value: &'a AttrValue,
    },
    /// Tokens sharing `token`'s value in `attribute`.
    Like {
        token: &'a Token,
        attribute: Attribute,
    },
    /// Tokens whose value in `attribute` differs from `token`'s. Tokens
    /// without a value there never match.
    Unlike {
        token: &'a Token,
        attribute: Attribute,
    },
    /// Tokens `token` links to.
    SuccessorOf(&'a Token),
    /// Tokens nothing links to.
    Heads,
    /// The token with the lowest ordinate.
    LowestOrdinate,
}

impl<'a> Criterion<'a> {
    #[must_use]
    pub fn like(token: &'a Token, attribute: Attribute) -> Self {
        Criterion::Like { token, attribute }
    }

    #[must_use]
    pub fn unlike(token: &'a Token, attribute: Attribute) -> Self {
        Criterion::Unlike { token, attribute }
    }

    #[must_use]
    pub fn value(attribute: Attribute, value: &'a AttrValue) -> Self {
        Criterion::Value { attribute, value }
    }
}

/// Draw one token uniformly at random.
///
/// The returned copy is registered with the current scope: the sampled item
/// is held in working memory until the caller purges or releases it.
pub fn sample(ctx: &mut Context, lexicon: &Lexicon) -> Result<Token, CogError> {
    let empty = CogError::EmptyCollection {
        collection: "lexicon",
    };
    let candidates = lexicon.len();
    let index = ctx.choose_index(candidates).ok_or(empty.clone())?;
    let token = lexicon.nth(index).cloned().ok_or(empty)?;
    let token = ctx.track(token);
    report(ctx, Primitive::Sample, Weight::from(candidates > 1));
    Ok(token)
}

/// Put `item` into `dest`: append to a list, push into a queue, click onto a
/// sequence, or insert into a lexicon.
pub fn add<T, S: Sink<T> + ?Sized>(ctx: &mut Context, dest: &mut S, item: T) {
    dest.put(ctx.tracker(), item);
    report(ctx, Primitive::Add, 1);
}

pub fn remove(ctx: &mut Context, lexicon: &mut Lexicon, token: &Token) -> Result<Token, CogError> {
    let removed = lexicon.remove_token(ctx.tracker(), token)?;
    report(ctx, Primitive::Remove, 1);
    Ok(removed)
}

/// Remove every token of `tokens` from `lexicon`, one `remove` each.
pub fn remove_all(
    ctx: &mut Context,
    lexicon: &mut Lexicon,
    tokens: &Lexicon,
) -> Result<(), CogError> {
    for token in tokens {
        remove(ctx, lexicon, token)?;
    }
    Ok(())
}

/// True with probability `p`.
pub fn flip(ctx: &mut Context, p: Probability) -> bool {
    let outcome = ctx.coin(p);
    report(ctx, Primitive::Flip, 1);
    outcome
}

/// `a` with probability `p`, else `b`, held in a tracked [`Mode`].
pub fn pick<T>(ctx: &mut Context, a: T, b: T, p: Probability) -> Mode<T> {
    let choice = if flip(ctx, p) { a } else { b };
    let mode = ctx.track(Mode::new(choice));
    report(ctx, Primitive::Pick, 0);
    mode
}

/// Read `token`'s value in `attribute`.
pub fn inquire(ctx: &mut Context, token: &Token, attribute: Attribute) -> Result<AttrValue, CogError> {
    let value = token.bias_value(attribute)?.clone();
    report(ctx, Primitive::Inquire, 1);
    Ok(value)
}

/// True if `a` and `b` share their value in `attribute`.
pub fn check_similarity(
    ctx: &mut Context,
    a: &Token,
    b: &Token,
    attribute: Attribute,
) -> Result<bool, CogError> {
    let same = a.bias_value(attribute)? == b.bias_value(attribute)?;
    report(ctx, Primitive::CheckSimilarity, 1);
    Ok(same)
}

/// Collect the tokens matching `criterion` into a new tracked lexicon with
/// `lexicon`'s layout. The source is left untouched.
pub fn find(ctx: &mut Context, lexicon: &Lexicon, criterion: &Criterion<'_>) -> Result<Lexicon, CogError> {
    let matches: Vec<Token> = match *criterion {
        Criterion::Value { attribute, value } => lexicon
            .iter()
            .filter(|t| t.attribute(attribute) == Some(value))
            .cloned()
            .collect(),
        Criterion::Like { token, attribute } => {
            let value = inquire(ctx, token, attribute)?;
            lexicon
                .iter()
                .filter(|t| t.attribute(attribute) == Some(&value))
                .cloned()
                .collect()
        }
        Criterion::Unlike { token, attribute } => {
            let value = inquire(ctx, token, attribute)?;
            lexicon
                .iter()
                .filter(|t| matches!(t.attribute(attribute), Some(v) if *v != value))
                .cloned()
                .collect()
        }
        Criterion::SuccessorOf(token) => lexicon.successors(token).into_iter().cloned().collect(),
        Criterion::Heads => lexicon.heads().into_iter().cloned().collect(),
        Criterion::LowestOrdinate => lexicon.first().cloned().into_iter().collect(),
    };
    let weight = 1 + matches.len() as Weight;
    let found = ctx.track(lexicon.sibling(matches));
    report(ctx, Primitive::Find, weight);
    Ok(found)
}

/// `find`, then remove every match from the source.
pub fn find_and_move(
    ctx: &mut Context,
    lexicon: &mut Lexicon,
    criterion: &Criterion<'_>,
) -> Result<Lexicon, CogError> {
    let found = find(ctx, lexicon, criterion)?;
    remove_all(ctx, lexicon, &found)?;
    Ok(found)
}

// Hand a sampled token over: add it to `dest`, then remove it from `source`.
fn deliver<S: Sink<Token> + ?Sized>(
    ctx: &mut Context,
    token: &Token,
    source: &mut Lexicon,
    dest: &mut S,
) -> Result<(), CogError> {
    ctx.purge(token);
    add(ctx, dest, token.clone());
    remove(ctx, source, token)?;
    Ok(())
}

/// Move one random token matching `criterion` from `source` into `dest`.
///
/// Returns the written token, or `None` (without sampling) when nothing
/// matches.
pub fn write_random<S: Sink<Token> + ?Sized>(
    ctx: &mut Context,
    source: &mut Lexicon,
    dest: &mut S,
    criterion: &Criterion<'_>,
) -> Result<Option<Token>, CogError> {
    let found = find(ctx, source, criterion)?;
    let written = if found.is_empty() {
        None
    } else {
        let token = sample(ctx, &found)?;
        deliver(ctx, &token, source, dest)?;
        Some(token)
    };
    ctx.release(found);
    report(ctx, Primitive::WriteRandom, 0);
    Ok(written)
}

/// Move every token matching `criterion` from `source` into `dest`, in
/// random order. Returns how many were written.
pub fn write_all<S: Sink<Token> + ?Sized>(
    ctx: &mut Context,
    source: &mut Lexicon,
    dest: &mut S,
    criterion: &Criterion<'_>,
) -> Result<usize, CogError> {
    let mut moved = find_and_move(ctx, source, criterion)?;
    let mut written = 0;
    while !moved.is_empty() {
        let token = sample(ctx, &moved)?;
        deliver(ctx, &token, &mut moved, dest)?;
        written += 1;
    }
    ctx.release(moved);
    report(ctx, Primitive::WriteAll, 0);
    Ok(written)
}

/// Package two already-chosen elements together.
pub fn merge<T>(ctx: &mut Context, first: T, second: T) -> Pair<T> {
    let pair = ctx.track(Pair::new(first, second));
    report(ctx, Primitive::Merge, 0);
    pair
}

/// One iteration of a strategy's control loop.
pub fn loop_step(ctx: &mut Context) {
    report(ctx, Primitive::Loop, 1);
}

/// Take the oldest item out of `queue`.
pub fn push_out<T>(ctx: &mut Context, queue: &mut Queue<T>) -> Result<T, CogError> {
    let item = queue
        .push_out(ctx.tracker())
        .ok_or(CogError::EmptyCollection { collection: "queue" })?;
    report(ctx, Primitive::PushOut, 1);
    Ok(item)
}
