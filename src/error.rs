//! Error kinds callers match on, and the crate-wide error type.

use crate::builder::BuildErrors;
use crate::definition::DefinitionError;
use crate::machine::TriggerError;
use std::fmt;

/// Checkable category of every error the crate returns.
///
/// Test errors with `is(kind)` instead of parsing their messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A state was declared both top-level and as a sub-state, or the
    /// adjacency of a built machine is corrupt.
    IllegalState,
    /// Two edges share the same `(source, event, target)`.
    DuplicateEdge,
    /// A sub-state was given two different parents.
    CannotHaveDiffParents,
    /// The initial state declares no outgoing edges of its own.
    NoOutEdges,
    /// No eligible edge anywhere from the current state up to its root.
    CouldNotTransition,
    /// The parent chain loops back on itself.
    HierarchyCycle,
    /// Nothing was configured.
    NoStates,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::IllegalState => "illegal state",
            Self::DuplicateEdge => "duplicate edge",
            Self::CannotHaveDiffParents => "state cannot have different parents",
            Self::NoOutEdges => "no out edges",
            Self::CouldNotTransition => "could not transition from current state",
            Self::HierarchyCycle => "cyclic state hierarchy",
            Self::NoStates => "no states configured",
        };
        f.write_str(text)
    }
}

/// Any error produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Build(#[from] BuildErrors),

    #[error(transparent)]
    Trigger(#[from] TriggerError),

    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

impl Error {
    /// True if this error is, or wraps, an error of `kind`.
    pub fn is(&self, kind: ErrorKind) -> bool {
        match self {
            Self::Build(errors) => errors.is(kind),
            Self::Trigger(error) => error.is(kind),
            Self::Definition(error) => error.is(kind),
        }
    }
}
