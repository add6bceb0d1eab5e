//! Transition records and history tracking.
//!
//! A [`Transition`] is the immutable record of one resolved hop. Resources
//! typically keep a [`TransitionHistory`] next to their current state.

use super::state::{Event, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single resolved transition.
///
/// Transitions are plain data: two records with equal fields are
/// interchangeable, and the caller owns every record it receives.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use krsm::core::Transition;
///
/// let transition: Transition<String, String> = Transition {
///     created_time: Utc::now(),
///     source_state: "Sleeping".to_string(),
///     source_parent_state: None,
///     event: "PET".to_string(),
///     target_state: "Purring".to_string(),
///     target_parent_state: None,
///     message: "So fluffy!".to_string(),
/// };
///
/// assert_eq!(transition.target_state, "Purring");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Transition<S: State, E: Event> {
    /// When the transition was resolved
    pub created_time: DateTime<Utc>,
    /// State the resource was in when the event arrived
    pub source_state: S,
    /// Parent of `source_state` in the hierarchy, if any
    pub source_parent_state: Option<S>,
    /// The event that triggered the hop
    pub event: E,
    /// State the resource moved to
    pub target_state: S,
    /// Parent of `target_state` in the hierarchy, if any
    pub target_parent_state: Option<S>,
    /// Caller-supplied free text
    pub message: String,
}

impl<S: State, E: Event> Transition<S, E> {
    /// True when the hop left the resource in the state it started from.
    pub fn is_self_transition(&self) -> bool {
        self.source_state == self.target_state
    }
}

/// Ordered history of transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition appended.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use krsm::core::{Transition, TransitionHistory};
///
/// let hop = |from: &str, to: &str| Transition {
///     created_time: Utc::now(),
///     source_state: from.to_string(),
///     source_parent_state: None,
///     event: "go".to_string(),
///     target_state: to.to_string(),
///     target_parent_state: None,
///     message: String::new(),
/// };
///
/// let history = TransitionHistory::new()
///     .record(hop("Start", "Middle"))
///     .record(hop("Middle", "End"));
///
/// let path = history.path();
/// assert_eq!(path.len(), 3); // Start -> Middle -> End
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionHistory<S: State, E: Event> {
    transitions: Vec<Transition<S, E>>,
}

impl<S: State, E: Event> Default for TransitionHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> TransitionHistory<S, E> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: Transition<S, E>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the source of the first transition, then the target of
    /// each transition in order.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.source_state);
        }
        for transition in &self.transitions {
            path.push(&transition.target_state);
        }
        path
    }

    /// Time elapsed between the first and last recorded transition.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            last.created_time
                .signed_duration_since(first.created_time)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    /// Most recent transition.
    pub fn last(&self) -> Option<&Transition<S, E>> {
        self.transitions.last()
    }

    /// All transitions in recording order.
    pub fn transitions(&self) -> &[Transition<S, E>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
