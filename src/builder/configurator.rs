//! Fluent per-state view over a builder.

use crate::builder::error::BuildErrors;
use crate::builder::machine::StateMachineBuilder;
use crate::core::{Event, Guard, State};
use crate::machine::{Edge, StateMachine};

/// Declares outgoing edges of one state.
///
/// Obtained from [`StateMachineBuilder::configure_state`] or
/// [`StateMachineBuilder::configure_sub_state`]. Every method hands back a
/// configurator, so a whole machine reads as one expression ending in
/// [`build`](StateConfigurator::build).
pub struct StateConfigurator<S: State, E: Event, R> {
    builder: StateMachineBuilder<S, E, R>,
    state: S,
}

impl<S: State, E: Event, R: 'static> StateConfigurator<S, E, R> {
    pub(crate) fn new(builder: StateMachineBuilder<S, E, R>, state: S) -> Self {
        Self { builder, state }
    }

    /// The state this configurator declares edges for.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Declare one unguarded edge to `target_state` per event.
    pub fn target<I>(mut self, target_state: S, events: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        for event in events {
            let edge = Edge::new(self.state.clone(), event, target_state.clone());
            self.builder.add_edge(edge);
        }
        self
    }

    /// Declare an edge to `target_state` taken only when `guard` passes.
    ///
    /// `guard_label` names the guard in diagnostics. Guarded edges sharing a
    /// `(state, event)` are tried in declaration order, so declare the more
    /// specific guard first.
    pub fn target_with_guard(
        mut self,
        target_state: S,
        event: E,
        guard_label: impl Into<String>,
        guard: Guard<R>,
    ) -> Self {
        let edge = Edge::guarded(self.state.clone(), event, target_state, guard_label, guard);
        self.builder.add_edge(edge);
        self
    }

    /// [`target_with_guard`](Self::target_with_guard) taking a closure.
    pub fn target_when<F>(
        self,
        target_state: S,
        event: E,
        guard_label: impl Into<String>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.target_with_guard(target_state, event, guard_label, Guard::new(predicate))
    }

    /// Switch to configuring another top-level state.
    pub fn configure_state(self, state: S) -> Self {
        self.builder.configure_state(state)
    }

    /// Switch to configuring a sub-state.
    pub fn configure_sub_state(self, child: S, parent: S) -> Self {
        self.builder.configure_sub_state(child, parent)
    }

    /// Return to the underlying builder.
    pub fn done(self) -> StateMachineBuilder<S, E, R> {
        self.builder
    }

    pub fn build(self) -> Result<StateMachine<S, E, R>, BuildErrors> {
        self.builder.build()
    }
}
