//! Declarative lexicon descriptions and the built-in catalog.

use std::collections::BTreeSet;

use cogseq_core::{Layout, Lexicon};
use cogseq_types::Token;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexiconSpecError {
    #[error("lexicon `{lexicon}` declares token `{token}` twice")]
    DuplicateToken { lexicon: String, token: String },
    #[error("lexicon `{lexicon}`: token `{token}` links to unknown token `{target}`")]
    UnknownLink {
        lexicon: String,
        token: String,
        target: String,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenSpec {
    pub name: String,
    pub attribute1: Option<String>,
    pub attribute2: Option<String>,
    pub ordinate: Option<f64>,
    #[serde(default)]
    pub successors: Vec<String>,
    #[serde(default)]
    pub predecessors: Vec<String>,
}

impl TokenSpec {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute1: None,
            attribute2: None,
            ordinate: None,
            successors: Vec::new(),
            predecessors: Vec::new(),
        }
    }

    pub fn attribute1(mut self, value: impl Into<String>) -> Self {
        self.attribute1 = Some(value.into());
        self
    }

    pub fn attribute2(mut self, value: impl Into<String>) -> Self {
        self.attribute2 = Some(value.into());
        self
    }

    pub fn ordinate(mut self, value: f64) -> Self {
        self.ordinate = Some(value);
        self
    }

    pub fn successor(mut self, name: impl Into<String>) -> Self {
        self.successors.push(name.into());
        self
    }

    fn to_token(&self) -> Token {
        let mut token = Token::new(self.name.as_str());
        if let Some(value) = &self.attribute1 {
            token = token.with_attribute1(value.as_str());
        }
        if let Some(value) = &self.attribute2 {
            token = token.with_attribute2(value.as_str());
        }
        if let Some(ordinate) = self.ordinate {
            token = token.with_ordinate(ordinate);
        }
        for name in &self.successors {
            token = token.with_successor(name.as_str());
        }
        for name in &self.predecessors {
            token = token.with_predecessor(name.as_str());
        }
        token
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexiconSpec {
    pub name: String,
    #[serde(default)]
    pub linked: bool,
    #[serde(default)]
    pub ordered: bool,
    pub tokens: Vec<TokenSpec>,
}

impl LexiconSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, tokens: Vec<TokenSpec>) -> Self {
        Self {
            name: name.into(),
            linked: false,
            ordered: false,
            tokens,
        }
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout {
            linked: self.linked,
            ordered: self.ordered,
        }
    }

    /// Build the lexicon. Token names must be unique and every link must
    /// name a token of the same spec.
    pub fn build(&self) -> Result<Lexicon, LexiconSpecError> {
        let mut names = BTreeSet::new();
        for token in &self.tokens {
            if !names.insert(token.name.as_str()) {
                return Err(LexiconSpecError::DuplicateToken {
                    lexicon: self.name.clone(),
                    token: token.name.clone(),
                });
            }
        }
        for token in &self.tokens {
            let mut targets = token.successors.iter().chain(&token.predecessors);
            if let Some(target) = targets.find(|t| !names.contains(t.as_str())) {
                return Err(LexiconSpecError::UnknownLink {
                    lexicon: self.name.clone(),
                    token: token.name.clone(),
                    target: target.clone(),
                });
            }
        }
        Ok(Lexicon::with_layout(
            self.tokens.iter().map(TokenSpec::to_token),
            self.layout(),
        ))
    }
}

fn colored(names: &[&str]) -> Vec<TokenSpec> {
    names
        .iter()
        .map(|name| {
            let color = match *name {
                "A" | "B" | "C" => "red",
                "D" | "E" | "F" => "blue",
                _ => "green",
            };
            TokenSpec::new(*name).attribute1(color)
        })
        .collect()
}

fn shaped(names: &[&str]) -> Vec<TokenSpec> {
    const COLORS: [&str; 3] = ["red", "blue", "green"];
    const SHAPES: [&str; 3] = ["circle", "square", "triangle"];
    names
        .iter()
        .map(|name| {
            // I..Q enumerate color-major over the 3x3 grid
            let index = name.bytes().next().map_or(0, |b| usize::from(b.saturating_sub(b'I')));
            TokenSpec::new(*name)
                .attribute1(COLORS[(index / 3) % 3])
                .attribute2(SHAPES[index % 3])
        })
        .collect()
}

/// The built-in lexicons.
///
/// `lex1`..`lex3` vary one color attribute, `lex4`..`lex6` add a shape.
/// `chain4` is a linked chain A..D and `ordinal4` carries ordinates 1..4.
#[must_use]
pub fn catalog() -> Vec<LexiconSpec> {
    let mut chain4 = LexiconSpec::new(
        "chain4",
        vec![
            TokenSpec::new("A").successor("B"),
            TokenSpec::new("B").successor("C"),
            TokenSpec::new("C").successor("D"),
            TokenSpec::new("D"),
        ],
    );
    chain4.linked = true;

    let mut ordinal4 = LexiconSpec::new(
        "ordinal4",
        ["W", "X", "Y", "Z"]
            .iter()
            .zip(1..)
            .map(|(name, n)| TokenSpec::new(*name).ordinate(f64::from(n)))
            .collect(),
    );
    ordinal4.ordered = true;

    vec![
        LexiconSpec::new("lex1", colored(&["A", "B", "D", "E"])),
        LexiconSpec::new("lex2", colored(&["A", "B", "C", "D", "E", "F"])),
        LexiconSpec::new("lex3", colored(&["A", "B", "D", "E", "G", "H"])),
        LexiconSpec::new("lex4", shaped(&["I", "J", "L", "M"])),
        LexiconSpec::new("lex5", shaped(&["I", "J", "K", "L", "M", "N"])),
        LexiconSpec::new("lex6", shaped(&["I", "J", "L", "M", "O", "P"])),
        chain4,
        ordinal4,
    ]
}

/// Look `name` up among `extra` first, then the catalog.
#[must_use]
pub fn lookup(name: &str, extra: &[LexiconSpec]) -> Option<LexiconSpec> {
    extra
        .iter()
        .find(|spec| spec.name == name)
        .cloned()
        .or_else(|| catalog().into_iter().find(|spec| spec.name == name))
}
