//! Core domain types for cogseq.
//!
//! This crate contains pure domain types with no IO and minimal dependencies:
//! tokens and their attributes, structure identities, probabilities and the
//! error taxonomy shared by every layer.

mod error;
mod ids;
mod probability;
mod token;

pub use error::CogError;
pub use ids::{StructureId, TokenName};
pub use probability::{Probability, ProbabilityError};
pub use token::{AttrValue, Attribute, Ordinate, Token};

/// Scalar footprint of a memory structure, and cost of a primitive call.
pub type Weight = u64;
