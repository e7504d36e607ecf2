//! Token sets backed by a derived relational graph.

use std::collections::BTreeSet;

use cogseq_types::{AttrValue, Attribute, CogError, StructureId, Token, TokenName, Weight};

use super::{LexiconGraph, Sink, Trackable};
use crate::complexity::Tracker;

/// Which relational edges a lexicon's graph carries besides attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Layout {
    pub linked: bool,
    pub ordered: bool,
}

impl Layout {
    pub const PLAIN: Layout = Layout {
        linked: false,
        ordered: false,
    };
    pub const LINKED: Layout = Layout {
        linked: true,
        ordered: false,
    };
    pub const ORDERED: Layout = Layout {
        linked: false,
        ordered: true,
    };
}

/// The working set of tokens available to one run.
///
/// The graph is rebuilt from the token set after every mutation, so the two
/// never disagree. Iteration follows token order, which keeps seeded runs
/// reproducible.
#[derive(Debug)]
pub struct Lexicon {
    id: StructureId,
    tokens: BTreeSet<Token>,
    layout: Layout,
    graph: LexiconGraph,
}

impl Lexicon {
    #[must_use]
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self::with_layout(tokens, Layout::PLAIN)
    }

    #[must_use]
    pub fn with_layout(tokens: impl IntoIterator<Item = Token>, layout: Layout) -> Self {
        let tokens: BTreeSet<Token> = tokens.into_iter().collect();
        let graph = LexiconGraph::build(&tokens, layout.linked, layout.ordered);
        Self {
            id: StructureId::fresh(),
            tokens,
            layout,
            graph,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new([])
    }

    /// A new lexicon with this one's layout.
    #[must_use]
    pub fn sibling(&self, tokens: impl IntoIterator<Item = Token>) -> Self {
        Self::with_layout(tokens, self.layout)
    }

    fn rebuild(&mut self, tracker: &Tracker) {
        self.graph = LexiconGraph::build(&self.tokens, self.layout.linked, self.layout.ordered);
        self.changed(tracker);
    }

    /// Insert `token`. Returns false (and changes nothing) if an equal token
    /// is already present.
    pub fn add_token(&mut self, tracker: &Tracker, token: Token) -> bool {
        let inserted = self.tokens.insert(token);
        if inserted {
            self.rebuild(tracker);
        }
        inserted
    }

    /// Remove the token equal to `token`, handing back the stored instance.
    pub fn remove_token(&mut self, tracker: &Tracker, token: &Token) -> Result<Token, CogError> {
        let removed = self.tokens.take(token).ok_or_else(|| CogError::NotFound {
            token: token.name().clone(),
            collection: "lexicon",
        })?;
        self.rebuild(tracker);
        Ok(removed)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn contains(&self, token: &Token) -> bool {
        self.tokens.contains(token)
    }

    /// First token (in token order) called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.name().as_str() == name)
    }

    #[must_use]
    pub fn nth(&self, index: usize) -> Option<&Token> {
        self.tokens.iter().nth(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    #[must_use]
    pub fn tokens(&self) -> &BTreeSet<Token> {
        &self.tokens
    }

    #[must_use]
    pub fn graph(&self) -> &LexiconGraph {
        &self.graph
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Tokens `token` links to, every token carrying a linked name
    /// included. Empty if `token` is not in the lexicon.
    #[must_use]
    pub fn successors(&self, token: &Token) -> Vec<&Token> {
        if !self.contains(token) {
            return Vec::new();
        }
        self.named(self.graph.linked_successors(token.name()))
    }

    /// Tokens linking to `token`. Empty if `token` is not in the lexicon.
    #[must_use]
    pub fn predecessors(&self, token: &Token) -> Vec<&Token> {
        if !self.contains(token) {
            return Vec::new();
        }
        self.named(self.graph.linked_predecessors(token.name()))
    }

    fn named(&self, names: Vec<&TokenName>) -> Vec<&Token> {
        let names: BTreeSet<&TokenName> = names.into_iter().collect();
        self.tokens
            .iter()
            .filter(|t| names.contains(t.name()))
            .collect()
    }

    /// Tokens with no incoming link edge.
    #[must_use]
    pub fn heads(&self) -> Vec<&Token> {
        self.tokens
            .iter()
            .filter(|t| !self.graph.has_incoming_link(t.name()))
            .collect()
    }

    /// The token with the lowest ordinate, if any token carries one.
    #[must_use]
    pub fn first(&self) -> Option<&Token> {
        self.tokens
            .iter()
            .filter(|t| t.ordinate().is_some())
            .min_by_key(|t| t.ordinate())
    }

    /// Distinct values present in `slot`.
    #[must_use]
    pub fn attribute_values(&self, slot: Attribute) -> BTreeSet<&AttrValue> {
        self.tokens.iter().filter_map(|t| t.attribute(slot)).collect()
    }
}

impl Clone for Lexicon {
    fn clone(&self) -> Self {
        Self {
            id: StructureId::fresh(),
            tokens: self.tokens.clone(),
            layout: self.layout,
            graph: self.graph.clone(),
        }
    }
}

impl PartialEq for Lexicon {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens && self.layout == other.layout
    }
}

impl Eq for Lexicon {}

impl Trackable for Lexicon {
    fn structure_id(&self) -> StructureId {
        self.id
    }

    fn compute_weight(&self) -> Weight {
        (self.tokens.len() + self.graph.edge_count()) as Weight
    }
}

impl Sink<Token> for Lexicon {
    fn put(&mut self, tracker: &Tracker, item: Token) {
        self.add_token(tracker, item);
    }
}

impl<'a> IntoIterator for &'a Lexicon {
    type Item = &'a Token;
    type IntoIter = std::collections::btree_set::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
