//! Definition error types.

use crate::builder::BuildErrors;
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors that can occur while loading or building a machine definition
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Edges reference guard labels missing from the registry
    #[error("Unknown guard label(s): {}", .labels.join(", "))]
    UnknownGuards { labels: Vec<String> },

    /// The definition replayed cleanly but the machine failed validation
    #[error(transparent)]
    Build(#[from] BuildErrors),
}

impl DefinitionError {
    /// True if this wraps a build error of `kind`.
    pub fn is(&self, kind: ErrorKind) -> bool {
        match self {
            Self::Build(errors) => errors.is(kind),
            _ => false,
        }
    }
}
