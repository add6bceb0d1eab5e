//! Errors returned while resolving a trigger.

use crate::error::ErrorKind;
use thiserror::Error;

/// Errors that can occur when triggering an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    /// No edge matched anywhere from the resource's state up to its root.
    /// The resource is left unchanged.
    #[error("could not transition from current state: no transition for event `{event}` from state `{state}`")]
    CouldNotTransition { state: String, event: String },

    /// An edge stored under `state` claims a different source. Signals a
    /// construction defect, never a caller error.
    #[error("illegal state: current state `{state}` does not match source state of edge {edge}")]
    IllegalState { state: String, edge: String },
}

impl TriggerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CouldNotTransition { .. } => ErrorKind::CouldNotTransition,
            Self::IllegalState { .. } => ErrorKind::IllegalState,
        }
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }
}
