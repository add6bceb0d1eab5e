//! Construction errors, collected during configuration and returned by `build()`.

use crate::error::ErrorKind;
use std::fmt;
use thiserror::Error;

/// A single structural problem found while configuring a machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("illegal state: `{state}` is already a sub-state of `{parent}` and cannot be configured as a top-level state")]
    SubStateConfiguredAsRoot { state: String, parent: String },

    #[error("illegal state: `{state}` is already a top-level state and cannot become a sub-state of `{parent}`")]
    RootConfiguredAsSubState { state: String, parent: String },

    #[error("duplicate edge {edge}")]
    DuplicateEdge { edge: String },

    #[error("state cannot have diff parent: `{state}` has parent `{existing}`, cannot also have `{requested}`")]
    ConflictingParent {
        state: String,
        existing: String,
        requested: String,
    },

    #[error("no out edges from initial state `{state}`")]
    NoOutEdges { state: String },

    #[error("cyclic state hierarchy: {}", .cycle.join(" -> "))]
    HierarchyCycle { cycle: Vec<String> },

    #[error("no states configured. Call .configure_state(state) before .build()")]
    NoStates,
}

impl BuildError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SubStateConfiguredAsRoot { .. } | Self::RootConfiguredAsSubState { .. } => {
                ErrorKind::IllegalState
            }
            Self::DuplicateEdge { .. } => ErrorKind::DuplicateEdge,
            Self::ConflictingParent { .. } => ErrorKind::CannotHaveDiffParents,
            Self::NoOutEdges { .. } => ErrorKind::NoOutEdges,
            Self::HierarchyCycle { .. } => ErrorKind::HierarchyCycle,
            Self::NoStates => ErrorKind::NoStates,
        }
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }
}

/// Every violation found in one construction session, in the order found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildErrors {
    machine: String,
    errors: Vec<BuildError>,
}

impl BuildErrors {
    pub(crate) fn new(machine: impl Into<String>, errors: Vec<BuildError>) -> Self {
        Self {
            machine: machine.into(),
            errors,
        }
    }

    /// Name of the machine that failed to build.
    pub fn machine(&self) -> &str {
        &self.machine
    }

    pub fn errors(&self) -> &[BuildError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// True if any collected error is of `kind`.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|e| e.is(kind))
    }

    /// Number of collected errors of `kind`.
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.is(kind)).count()
    }
}

impl fmt::Display for BuildErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "state machine `{}` has {} construction error(s)",
            self.machine,
            self.errors.len()
        )?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BuildErrors {}

impl IntoIterator for BuildErrors {
    type Item = BuildError;
    type IntoIter = std::vec::IntoIter<BuildError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
