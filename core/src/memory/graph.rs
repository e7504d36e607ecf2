//! The labelled graph derived from a lexicon's token set.

use std::collections::BTreeSet;

use cogseq_types::{AttrValue, Attribute, Ordinate, Token, TokenName};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Node {
    Token(TokenName),
    Value(Attribute, AttrValue),
    Ordinate(Ordinate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeLabel {
    /// token -> attribute value
    HasAttribute(Attribute),
    /// ordinate -> token
    HasOrdinate,
    /// token -> token, from a declared predecessor/successor link
    Linked,
    /// ordinate -> next larger ordinate
    Precedes,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub from: Node,
    pub to: Node,
    pub label: EdgeLabel,
}

/// Token nodes, attribute-value nodes and ordinate nodes with labelled edges.
///
/// Edges form a set: a link declared from both ends (A lists B as successor
/// and B lists A as predecessor) is one edge. Link edges are only drawn
/// between tokens present in the lexicon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexiconGraph {
    nodes: BTreeSet<Node>,
    edges: BTreeSet<Edge>,
}

impl LexiconGraph {
    pub(crate) fn build(tokens: &BTreeSet<Token>, linked: bool, ordered: bool) -> Self {
        let mut graph = Self::default();
        let present: BTreeSet<&TokenName> = tokens.iter().map(Token::name).collect();

        for token in tokens {
            let node = Node::Token(token.name().clone());
            graph.nodes.insert(node.clone());
            for slot in Attribute::ALL {
                if let Some(value) = token.attribute(slot) {
                    graph.connect(
                        node.clone(),
                        Node::Value(slot, value.clone()),
                        EdgeLabel::HasAttribute(slot),
                    );
                }
            }
            if let Some(ordinate) = token.ordinate() {
                graph.connect(Node::Ordinate(ordinate), node.clone(), EdgeLabel::HasOrdinate);
            }
        }

        if linked {
            for token in tokens {
                for pred in token.predecessors().iter().filter(|p| present.contains(p)) {
                    graph.connect(
                        Node::Token(pred.clone()),
                        Node::Token(token.name().clone()),
                        EdgeLabel::Linked,
                    );
                }
                for succ in token.successors().iter().filter(|s| present.contains(s)) {
                    graph.connect(
                        Node::Token(token.name().clone()),
                        Node::Token(succ.clone()),
                        EdgeLabel::Linked,
                    );
                }
            }
        }

        if ordered {
            let ordinates: Vec<Ordinate> = graph
                .nodes
                .iter()
                .filter_map(|node| match node {
                    Node::Ordinate(o) => Some(*o),
                    _ => None,
                })
                .collect();
            for pair in ordinates.windows(2) {
                graph.connect(
                    Node::Ordinate(pair[0]),
                    Node::Ordinate(pair[1]),
                    EdgeLabel::Precedes,
                );
            }
        }

        graph
    }

    fn connect(&mut self, from: Node, to: Node, label: EdgeLabel) {
        self.nodes.insert(from.clone());
        self.nodes.insert(to.clone());
        self.edges.insert(Edge { from, to, label });
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    #[must_use]
    pub fn contains_node(&self, node: &Node) -> bool {
        self.nodes.contains(node)
    }

    pub fn out_edges<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |edge| &edge.from == node)
    }

    /// Names of tokens `name` links to.
    #[must_use]
    pub fn linked_successors(&self, name: &TokenName) -> Vec<&TokenName> {
        let node = Node::Token(name.clone());
        self.edges
            .iter()
            .filter(|edge| edge.label == EdgeLabel::Linked && edge.from == node)
            .filter_map(|edge| match &edge.to {
                Node::Token(to) => Some(to),
                _ => None,
            })
            .collect()
    }

    /// Names of tokens linking to `name`.
    #[must_use]
    pub fn linked_predecessors(&self, name: &TokenName) -> Vec<&TokenName> {
        let node = Node::Token(name.clone());
        self.edges
            .iter()
            .filter(|edge| edge.label == EdgeLabel::Linked && edge.to == node)
            .filter_map(|edge| match &edge.from {
                Node::Token(from) => Some(from),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn has_incoming_link(&self, name: &TokenName) -> bool {
        !self.linked_predecessors(name).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tokens: impl IntoIterator<Item = Token>) -> BTreeSet<Token> {
        tokens.into_iter().collect()
    }

    #[test]
    fn attribute_edges_per_token() {
        let tokens = set([
            Token::new("A").with_attribute1("red"),
            Token::new("B").with_attribute1("red").with_attribute2("circle"),
        ]);
        let graph = LexiconGraph::build(&tokens, false, false);
        assert_eq!(graph.edge_count(), 3);
        // A, B, red, circle
        assert_eq!(graph.node_count(), 4);
        assert!(graph.contains_node(&Node::Value(Attribute::Second, AttrValue::from("circle"))));
    }

    #[test]
    fn same_value_in_different_slots_are_distinct_nodes() {
        let tokens = set([Token::new("A").with_attribute1("x").with_attribute2("x")]);
        let graph = LexiconGraph::build(&tokens, false, false);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn links_are_deduplicated_and_confined_to_present_tokens() {
        let tokens = set([
            Token::new("A").with_successor("B"),
            Token::new("B").with_predecessor("A").with_successor("Z"),
        ]);
        let graph = LexiconGraph::build(&tokens, true, false);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.linked_successors(&TokenName::from("A")), vec![&TokenName::from("B")]);
        assert!(graph.has_incoming_link(&TokenName::from("B")));
        assert!(!graph.has_incoming_link(&TokenName::from("A")));
    }

    #[test]
    fn links_ignored_when_not_linked() {
        let tokens = set([Token::new("A").with_successor("B"), Token::new("B")]);
        let graph = LexiconGraph::build(&tokens, false, false);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn ordered_chains_ordinates() {
        let tokens = set([
            Token::new("A").with_ordinate(2u32),
            Token::new("B").with_ordinate(1u32),
            Token::new("C").with_ordinate(3u32),
        ]);
        let graph = LexiconGraph::build(&tokens, false, true);
        // three HasOrdinate edges plus 1->2, 2->3
        assert_eq!(graph.edge_count(), 5);
        let first = Node::Ordinate(Ordinate::from(1u32));
        let next: Vec<&Edge> = graph
            .out_edges(&first)
            .filter(|e| e.label == EdgeLabel::Precedes)
            .collect();
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].to, Node::Ordinate(Ordinate::from(2u32)));
    }
}
