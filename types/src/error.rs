use thiserror::Error;

use crate::{Attribute, TokenName};

/// Failures a primitive operation can surface.
///
/// Each one signals a defect in the calling strategy, so nothing in the core
/// recovers from them; they propagate to whoever started the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CogError {
    #[error("cannot draw from an empty {collection}")]
    EmptyCollection { collection: &'static str },
    #[error("token {token} is not in the {collection}")]
    NotFound {
        token: TokenName,
        collection: &'static str,
    },
    #[error("token {token} has no {attribute}")]
    AttributeMissing {
        token: TokenName,
        attribute: Attribute,
    },
}

impl CogError {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            CogError::EmptyCollection { .. } => "empty_collection",
            CogError::NotFound { .. } => "not_found",
            CogError::AttributeMissing { .. } => "attribute_missing",
        }
    }
}
