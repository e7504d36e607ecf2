//! Shared test utilities and fixtures

#![allow(dead_code)]

use cogseq_core::{Complexity, Context, Lexicon, RunSnapshot};
use cogseq_types::{CogError, Token};

/// Four tokens, two red and two blue, on attribute1.
pub fn two_by_two() -> Lexicon {
    Lexicon::new([
        Token::new("A").with_attribute1("red"),
        Token::new("B").with_attribute1("red"),
        Token::new("D").with_attribute1("blue"),
        Token::new("E").with_attribute1("blue"),
    ])
}

/// A catalog lexicon, built.
pub fn catalog_lexicon(name: &str) -> Lexicon {
    cogseq_config::lookup(name, &[])
        .unwrap_or_else(|| panic!("no catalog lexicon {name}"))
        .build()
        .unwrap()
}

/// Run `body` in its own scope and return its snapshot.
pub fn measured<T>(
    ctx: &mut Context,
    label: &str,
    body: impl FnOnce(&mut Context) -> Result<T, CogError>,
) -> (T, RunSnapshot) {
    let mut history = Complexity::new();
    let value = ctx.measure(label, &mut history, body).unwrap();
    let snapshot = history.last().cloned().unwrap();
    (value, snapshot)
}
