//! Directed, labeled arcs between states.

use crate::core::{Event, Guard, State};
use std::fmt;

/// A declared `(source, event, target)` arc, optionally guarded.
///
/// Edges are created by the builder and are immutable once the machine is
/// built. Guard identity plays no part in equality between arcs: two edges
/// with the same source, event and target are duplicates whatever their
/// guards.
pub struct Edge<S: State, E: Event, R> {
    source_state: S,
    event: E,
    target_state: S,
    guard: Option<LabeledGuard<R>>,
}

struct LabeledGuard<R> {
    label: String,
    guard: Guard<R>,
}

impl<S: State, E: Event, R: 'static> Edge<S, E, R> {
    pub(crate) fn new(source_state: S, event: E, target_state: S) -> Self {
        Self {
            source_state,
            event,
            target_state,
            guard: None,
        }
    }

    pub(crate) fn guarded(
        source_state: S,
        event: E,
        target_state: S,
        label: impl Into<String>,
        guard: Guard<R>,
    ) -> Self {
        Self {
            source_state,
            event,
            target_state,
            guard: Some(LabeledGuard {
                label: label.into(),
                guard,
            }),
        }
    }

    pub fn source_state(&self) -> &S {
        &self.source_state
    }

    pub fn event(&self) -> &E {
        &self.event
    }

    pub fn target_state(&self) -> &S {
        &self.target_state
    }

    /// Diagnostic label of the guard, if the edge is guarded.
    pub fn guard_label(&self) -> Option<&str> {
        self.guard.as_ref().map(|g| g.label.as_str())
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    /// True when the guard passes for `resource`. Unguarded edges always pass.
    pub fn guard_passes(&self, resource: &R) -> bool {
        self.guard
            .as_ref()
            .is_none_or(|g| g.guard.check(resource))
    }

    /// True when `event` matches and the guard (if any) passes.
    pub fn is_eligible(&self, event: &E, resource: &R) -> bool {
        self.event == *event && self.guard_passes(resource)
    }

    /// True when both edges describe the same `(source, event, target)` arc.
    pub fn same_arc(&self, other: &Self) -> bool {
        self.source_state == other.source_state
            && self.event == other.event
            && self.target_state == other.target_state
    }
}

impl<S: State, E: Event, R> Clone for Edge<S, E, R> {
    fn clone(&self) -> Self {
        Self {
            source_state: self.source_state.clone(),
            event: self.event.clone(),
            target_state: self.target_state.clone(),
            guard: self.guard.as_ref().map(|g| LabeledGuard {
                label: g.label.clone(),
                guard: g.guard.clone(),
            }),
        }
    }
}

impl<S: State, E: Event, R> fmt::Display for Edge<S, E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}-{}-{})",
            self.source_state.name(),
            self.event.name(),
            self.target_state.name()
        )?;
        if let Some(guard) = &self.guard {
            write!(f, "[{}]", guard.label)?;
        }
        Ok(())
    }
}

impl<S: State, E: Event, R> fmt::Debug for Edge<S, E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edge")
            .field("source_state", &self.source_state)
            .field("event", &self.event)
            .field("target_state", &self.target_state)
            .field("guard_label", &self.guard.as_ref().map(|g| &g.label))
            .finish()
    }
}
