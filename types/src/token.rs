//! Tokens and their categorical attributes.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::{CogError, StructureId, TokenName};

/// One of the two categorical attribute slots a token can carry.
///
/// A strategy's bias is one of these slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "attribute1")]
    First,
    #[serde(rename = "attribute2")]
    Second,
}

impl Attribute {
    pub const ALL: [Attribute; 2] = [Attribute::First, Attribute::Second];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Attribute::First => "attribute1",
            Attribute::Second => "attribute2",
        }
    }

    /// The slot that is not `self`.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Attribute::First => Attribute::Second,
            Attribute::Second => Attribute::First,
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attribute1" | "first" | "1" => Some(Attribute::First),
            "attribute2" | "second" | "2" => Some(Attribute::Second),
            _ => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A categorical attribute value such as `red` or `circle`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttrValue(String);

impl AttrValue {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Numeric position of a token in an ordered lexicon.
///
/// Equality, hashing and ordering use the IEEE total order, so `Ordinate` can
/// key ordered collections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ordinate(f64);

impl Ordinate {
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Ordinate {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Ordinate {}

impl PartialOrd for Ordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Ordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Ordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Ordinate {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<u32> for Ordinate {
    fn from(value: u32) -> Self {
        Self(f64::from(value))
    }
}

/// An atomic labelled entity: a name, up to two attribute values, optional
/// links to other tokens (by name), and an optional ordinate.
///
/// Identity is structural. Two tokens are equal when every field except the
/// tracking id matches; the id only distinguishes live instances for space
/// accounting. Cloning allocates a fresh id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Token {
    name: TokenName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attribute1: Option<AttrValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attribute2: Option<AttrValue>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    predecessors: BTreeSet<TokenName>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    successors: BTreeSet<TokenName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ordinate: Option<Ordinate>,
    #[serde(skip, default = "StructureId::fresh")]
    id: StructureId,
}

impl Token {
    #[must_use]
    pub fn new(name: impl Into<TokenName>) -> Self {
        Self {
            name: name.into(),
            attribute1: None,
            attribute2: None,
            predecessors: BTreeSet::new(),
            successors: BTreeSet::new(),
            ordinate: None,
            id: StructureId::fresh(),
        }
    }

    pub fn with_attribute1(mut self, value: impl Into<AttrValue>) -> Self {
        self.attribute1 = Some(value.into());
        self
    }

    pub fn with_attribute2(mut self, value: impl Into<AttrValue>) -> Self {
        self.attribute2 = Some(value.into());
        self
    }

    pub fn with_ordinate(mut self, ordinate: impl Into<Ordinate>) -> Self {
        self.ordinate = Some(ordinate.into());
        self
    }

    pub fn with_successor(mut self, name: impl Into<TokenName>) -> Self {
        self.successors.insert(name.into());
        self
    }

    pub fn with_predecessor(mut self, name: impl Into<TokenName>) -> Self {
        self.predecessors.insert(name.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &TokenName {
        &self.name
    }

    #[must_use]
    pub fn id(&self) -> StructureId {
        self.id
    }

    #[must_use]
    pub fn attribute(&self, slot: Attribute) -> Option<&AttrValue> {
        match slot {
            Attribute::First => self.attribute1.as_ref(),
            Attribute::Second => self.attribute2.as_ref(),
        }
    }

    /// The value in `slot`, or `AttributeMissing` when the token has none.
    pub fn bias_value(&self, slot: Attribute) -> Result<&AttrValue, CogError> {
        self.attribute(slot)
            .ok_or_else(|| CogError::AttributeMissing {
                token: self.name.clone(),
                attribute: slot,
            })
    }

    /// Explicit attribute assignment. Primitives never call this.
    pub fn set_attribute(&mut self, slot: Attribute, value: Option<AttrValue>) {
        match slot {
            Attribute::First => self.attribute1 = value,
            Attribute::Second => self.attribute2 = value,
        }
    }

    #[must_use]
    pub fn predecessors(&self) -> &BTreeSet<TokenName> {
        &self.predecessors
    }

    #[must_use]
    pub fn successors(&self) -> &BTreeSet<TokenName> {
        &self.successors
    }

    #[must_use]
    pub fn ordinate(&self) -> Option<Ordinate> {
        self.ordinate
    }

    #[must_use]
    pub fn is_linked(&self) -> bool {
        !self.predecessors.is_empty() || !self.successors.is_empty()
    }

    /// Count of present fields among attribute1, attribute2, predecessors,
    /// successors and ordinate. Empty link sets count as absent.
    #[must_use]
    pub fn weight(&self) -> u64 {
        [
            self.attribute1.is_some(),
            self.attribute2.is_some(),
            !self.predecessors.is_empty(),
            !self.successors.is_empty(),
            self.ordinate.is_some(),
        ]
        .into_iter()
        .map(u64::from)
        .sum()
    }

    fn key(&self) -> TokenKey<'_> {
        (
            &self.name,
            self.attribute1.as_ref(),
            self.attribute2.as_ref(),
            &self.predecessors,
            &self.successors,
            self.ordinate,
        )
    }
}

type TokenKey<'a> = (
    &'a TokenName,
    Option<&'a AttrValue>,
    Option<&'a AttrValue>,
    &'a BTreeSet<TokenName>,
    &'a BTreeSet<TokenName>,
    Option<Ordinate>,
);

impl Clone for Token {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            attribute1: self.attribute1.clone(),
            attribute2: self.attribute2.clone(),
            predecessors: self.predecessors.clone(),
            successors: self.successors.clone(),
            ordinate: self.ordinate,
            id: StructureId::fresh(),
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Token {}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        let values: Vec<&str> = [self.attribute1.as_ref(), self.attribute2.as_ref()]
            .into_iter()
            .flatten()
            .map(AttrValue::as_str)
            .collect();
        if !values.is_empty() {
            write!(f, "({})", values.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_counts_present_fields() {
        assert_eq!(Token::new("A").weight(), 0);
        assert_eq!(Token::new("A").with_attribute1("red").weight(), 1);
        let full = Token::new("A")
            .with_attribute1("red")
            .with_attribute2("circle")
            .with_predecessor("Z")
            .with_successor("B")
            .with_ordinate(1u32);
        assert_eq!(full.weight(), 5);
    }

    #[test]
    fn set_attribute_changes_value_and_weight() {
        let mut token = Token::new("A").with_attribute1("red");
        token.set_attribute(Attribute::Second, Some(AttrValue::from("circle")));
        assert_eq!(token.attribute(Attribute::Second).unwrap().as_str(), "circle");
        assert_eq!(token.weight(), 2);
        token.set_attribute(Attribute::First, Some(AttrValue::from("blue")));
        assert_eq!(token.attribute(Attribute::First).unwrap().as_str(), "blue");
        assert_eq!(token.weight(), 2);
        token.set_attribute(Attribute::First, None);
        assert!(token.attribute(Attribute::First).is_none());
        assert_eq!(token.weight(), 1);
    }

    #[test]
    fn equality_ignores_tracking_id() {
        let a = Token::new("A").with_attribute1("red");
        let b = a.clone();
        assert_ne!(a.id(), b.id());
        assert_eq!(a, b);
    }

    #[test]
    fn equality_is_structural() {
        let a = Token::new("A").with_attribute1("red");
        assert_ne!(a, Token::new("A").with_attribute1("blue"));
        assert_ne!(a, Token::new("A").with_attribute1("red").with_ordinate(1u32));
        assert_ne!(a, Token::new("A").with_attribute1("red").with_successor("B"));
    }

    #[test]
    fn bias_value_reports_missing_slot() {
        let token = Token::new("A").with_attribute1("red");
        assert_eq!(token.bias_value(Attribute::First).unwrap().as_str(), "red");
        let err = token.bias_value(Attribute::Second).unwrap_err();
        assert_eq!(
            err,
            CogError::AttributeMissing {
                token: TokenName::from("A"),
                attribute: Attribute::Second,
            }
        );
    }

    #[test]
    fn attribute_parse_and_other() {
        assert_eq!(Attribute::parse("attribute1"), Some(Attribute::First));
        assert_eq!(Attribute::parse(" Attribute2 "), Some(Attribute::Second));
        assert_eq!(Attribute::parse("color"), None);
        assert_eq!(Attribute::First.other(), Attribute::Second);
    }

    #[test]
    fn ordinate_total_order() {
        let mut ords = [Ordinate::new(3.0), Ordinate::new(-1.0), Ordinate::new(2.5)];
        ords.sort();
        assert_eq!(ords.map(Ordinate::value), [-1.0, 2.5, 3.0]);
    }

    #[test]
    fn serde_skips_absent_fields() {
        let token = Token::new("A").with_attribute1("red");
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, r#"{"name":"A","attribute1":"red"}"#);
        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }
}
