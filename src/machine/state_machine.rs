//! The built, immutable state machine and its resolution algorithm.

use crate::core::{Event, Resource, State, Transition};
use crate::machine::clock::Clock;
use crate::machine::edge::Edge;
use crate::machine::error::TriggerError;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// A validated transition graph over a state hierarchy.
///
/// The graph is read-only after `build()`, so one machine can be shared
/// (e.g. behind an `Arc`) by threads driving different resources. Each call
/// to [`trigger`](StateMachine::trigger) mutates only the resource passed in.
pub struct StateMachine<S: State, E: Event, R> {
    name: String,
    states: Vec<S>,
    edges: BTreeMap<S, Vec<Edge<S, E, R>>>,
    parents: BTreeMap<S, S>,
    clock: Arc<dyn Clock>,
}

impl<S: State, E: Event, R: 'static> StateMachine<S, E, R> {
    /// Assemble a machine from validated parts. `states` must be non-empty.
    pub(crate) fn from_parts(
        name: String,
        states: Vec<S>,
        edges: BTreeMap<S, Vec<Edge<S, E, R>>>,
        parents: BTreeMap<S, S>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            name,
            states,
            edges,
            parents,
            clock,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every state the machine knows about, without duplicates.
    pub fn states(&self) -> BTreeSet<S> {
        self.states.iter().cloned().collect()
    }

    /// States in the order they were first mentioned during construction.
    pub fn declared_states(&self) -> &[S] {
        &self.states
    }

    /// The first declared state.
    pub fn initial_state(&self) -> &S {
        // build() refuses to produce a machine without states
        &self.states[0]
    }

    /// Outgoing edges declared on `state` itself, in declaration order.
    pub fn edges_from(&self, state: &S) -> &[Edge<S, E, R>] {
        self.edges.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parent_of(&self, state: &S) -> Option<&S> {
        self.parents.get(state)
    }

    /// Ancestors of `state`, nearest first.
    pub fn ancestors(&self, state: &S) -> Vec<&S> {
        let mut chain = Vec::new();
        let mut cursor = self.parents.get(state);
        while let Some(parent) = cursor {
            chain.push(parent);
            cursor = self.parents.get(parent);
        }
        chain
    }

    /// True when `state` is `ancestor` or one of its descendants.
    pub fn is_in_state(&self, state: &S, ancestor: &S) -> bool {
        state == ancestor || self.ancestors(state).contains(&ancestor)
    }
}

impl<S: State, E: Event, R: Resource<S, E> + 'static> StateMachine<S, E, R> {
    /// Find the edge `event` would take for `resource`, without changing it.
    ///
    /// Edges of the current state are scanned in declaration order and the
    /// first one whose event matches and whose guard passes wins. A failing
    /// guard only skips that edge. When the state is exhausted the search
    /// continues on its parent, then the parent's parent, up to the root.
    pub fn resolve(&self, event: &E, resource: &R) -> Result<&Edge<S, E, R>, TriggerError> {
        let current = resource.current_state();
        let mut scan_state = &current;

        loop {
            for edge in self.edges_from(scan_state) {
                if edge.source_state() != scan_state {
                    tracing::error!(
                        machine = %self.name,
                        resource = %resource.key(),
                        state = scan_state.name(),
                        edge = %edge,
                        "edge source does not match the state it is stored under"
                    );
                    return Err(TriggerError::IllegalState {
                        state: scan_state.name().to_string(),
                        edge: edge.to_string(),
                    });
                }
                if edge.is_eligible(event, resource) {
                    return Ok(edge);
                }
                if edge.event() == event {
                    tracing::trace!(
                        machine = %self.name,
                        edge = %edge,
                        "guard rejected edge"
                    );
                }
            }

            match self.parents.get(scan_state) {
                Some(parent) => {
                    tracing::trace!(
                        machine = %self.name,
                        from = scan_state.name(),
                        to = parent.name(),
                        "climbing to parent state"
                    );
                    scan_state = parent;
                }
                None => {
                    return Err(TriggerError::CouldNotTransition {
                        state: current.name().to_string(),
                        event: event.name().to_string(),
                    })
                }
            }
        }
    }

    /// True when `event` would currently resolve for `resource`.
    pub fn can_fire(&self, event: &E, resource: &R) -> bool {
        self.resolve(event, resource).is_ok()
    }

    /// Events that would currently resolve for `resource`, sorted.
    pub fn permitted_events(&self, resource: &R) -> Vec<E> {
        let current = resource.current_state();
        let mut events = BTreeSet::new();
        let levels = std::iter::once(&current).chain(self.ancestors(&current));
        for state in levels {
            for edge in self.edges_from(state) {
                if edge.guard_passes(resource) {
                    events.insert(edge.event().clone());
                }
            }
        }
        events.into_iter().collect()
    }

    /// Resolve `event` for `resource` and advance it.
    ///
    /// On success the new [`Transition`] has been handed to
    /// [`Resource::set_transition`] and a copy is returned. On error the
    /// resource is untouched.
    pub fn trigger(
        &self,
        event: E,
        resource: &mut R,
        message: impl Into<String>,
    ) -> Result<Transition<S, E>, TriggerError> {
        let target_state = match self.resolve(&event, resource) {
            Ok(edge) => edge.target_state().clone(),
            Err(error) => {
                tracing::debug!(
                    machine = %self.name,
                    resource = %resource.key(),
                    event = event.name(),
                    %error,
                    "trigger failed"
                );
                return Err(error);
            }
        };

        let source_state = resource.current_state();
        let transition = Transition {
            created_time: self.clock.now(),
            source_parent_state: self.parents.get(&source_state).cloned(),
            target_parent_state: self.parents.get(&target_state).cloned(),
            source_state,
            event,
            target_state,
            message: message.into(),
        };

        tracing::debug!(
            machine = %self.name,
            resource = %resource.key(),
            from = transition.source_state.name(),
            event = transition.event.name(),
            to = transition.target_state.name(),
            "transition resolved"
        );

        resource.set_transition(transition.clone());
        Ok(transition)
    }
}

impl<S: State, E: Event, R> fmt::Debug for StateMachine<S, E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("name", &self.name)
            .field("states", &self.states)
            .field("parents", &self.parents)
            .field("edges", &self.edges.values().map(Vec::len).sum::<usize>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Guard;
    use crate::machine::clock::FixedClock;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Dog {
        state: String,
        age: u32,
        transitions: Vec<Transition<String, String>>,
    }

    impl Dog {
        fn at(state: &str, age: u32) -> Self {
            Self {
                state: state.to_string(),
                age,
                transitions: Vec::new(),
            }
        }
    }

    impl Resource<String, String> for Dog {
        fn name(&self) -> &str {
            "rex"
        }

        fn namespace(&self) -> &str {
            "kennel"
        }

        fn current_state(&self) -> String {
            self.state.clone()
        }

        fn set_transition(&mut self, transition: Transition<String, String>) {
            self.state = transition.target_state.clone();
            self.transitions.push(transition);
        }
    }

    fn s(name: &str) -> String {
        name.to_string()
    }

    // Asleep -KICK-> Barking; Awake -FEED-> Eating; Barking < Awake;
    // Barking -SLAP-> Biting (puppy) / Barking (otherwise)
    fn dog_machine() -> StateMachine<String, String, Dog> {
        let puppy = Guard::new(|d: &Dog| d.age < 10);
        let mut edges = BTreeMap::new();
        edges.insert(s("Asleep"), vec![Edge::new(s("Asleep"), s("KICK"), s("Barking"))]);
        edges.insert(s("Awake"), vec![Edge::new(s("Awake"), s("FEED"), s("Eating"))]);
        edges.insert(
            s("Barking"),
            vec![
                Edge::guarded(s("Barking"), s("SLAP"), s("Biting"), "puppy", puppy.clone()),
                Edge::guarded(s("Barking"), s("SLAP"), s("Barking"), "!puppy", puppy.negate()),
            ],
        );
        let mut parents = BTreeMap::new();
        parents.insert(s("Barking"), s("Awake"));
        parents.insert(s("Biting"), s("Awake"));

        StateMachine::from_parts(
            s("DogMachine"),
            vec![s("Asleep"), s("Barking"), s("Awake"), s("Eating"), s("Biting")],
            edges,
            parents,
            Arc::new(FixedClock::new(Utc::now())),
        )
    }

    #[test]
    fn trigger_advances_resource_and_records_transition() {
        let machine = dog_machine();
        let mut dog = Dog::at("Asleep", 3);

        let transition = machine.trigger(s("KICK"), &mut dog, "kicking Tommy").unwrap();

        assert_eq!(dog.state, "Barking");
        assert_eq!(transition.source_state, "Asleep");
        assert_eq!(transition.target_state, "Barking");
        assert_eq!(transition.source_parent_state, None);
        assert_eq!(transition.target_parent_state, Some(s("Awake")));
        assert_eq!(transition.message, "kicking Tommy");
        assert_eq!(dog.transitions, vec![transition]);
    }

    #[test]
    fn parent_edges_are_inherited() {
        let machine = dog_machine();
        let mut dog = Dog::at("Biting", 3);

        let transition = machine.trigger(s("FEED"), &mut dog, "dont bite, eat").unwrap();

        assert_eq!(transition.source_state, "Biting");
        assert_eq!(transition.source_parent_state, Some(s("Awake")));
        assert_eq!(dog.state, "Eating");
    }

    #[test]
    fn failing_guard_falls_through_to_next_edge() {
        let machine = dog_machine();
        let mut puppy = Dog::at("Barking", 1);
        let mut old_dog = Dog::at("Barking", 10);

        machine.trigger(s("SLAP"), &mut puppy, "").unwrap();
        machine.trigger(s("SLAP"), &mut old_dog, "").unwrap();

        assert_eq!(puppy.state, "Biting");
        assert_eq!(old_dog.state, "Barking");
    }

    #[test]
    fn guards_of_other_events_are_not_evaluated() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = {
            let calls = Arc::clone(&calls);
            Guard::new(move |_: &Dog| {
                calls.fetch_add(1, Ordering::SeqCst);
                true
            })
        };
        let mut edges = BTreeMap::new();
        edges.insert(
            s("Awake"),
            vec![
                Edge::guarded(s("Awake"), s("SLAP"), s("Biting"), "counted", counted),
                Edge::new(s("Awake"), s("FEED"), s("Eating")),
            ],
        );
        let machine = StateMachine::from_parts(
            s("DogMachine"),
            vec![s("Awake"), s("Biting"), s("Eating")],
            edges,
            BTreeMap::new(),
            Arc::new(FixedClock::new(Utc::now())),
        );
        let mut dog = Dog::at("Awake", 3);

        machine.trigger(s("FEED"), &mut dog, "").unwrap();

        assert_eq!(dog.state, "Eating");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unknown_event_leaves_resource_unchanged() {
        let machine = dog_machine();
        let mut dog = Dog::at("Eating", 3);

        let error = machine.trigger(s("PET"), &mut dog, "eat more").unwrap_err();

        assert!(error.is(crate::ErrorKind::CouldNotTransition));
        assert_eq!(dog.state, "Eating");
        assert!(dog.transitions.is_empty());
    }

    #[test]
    fn corrupted_adjacency_is_illegal_state() {
        let mut edges = BTreeMap::new();
        edges.insert(s("A"), vec![Edge::new(s("B"), s("go"), s("C"))]);
        let machine: StateMachine<String, String, Dog> = StateMachine::from_parts(
            s("Broken"),
            vec![s("A"), s("B"), s("C")],
            edges,
            BTreeMap::new(),
            Arc::new(FixedClock::new(Utc::now())),
        );
        let mut dog = Dog::at("A", 1);

        let error = machine.trigger(s("go"), &mut dog, "").unwrap_err();

        assert!(error.is(crate::ErrorKind::IllegalState));
        assert_eq!(dog.state, "A");
    }

    #[test]
    fn resolve_does_not_mutate() {
        let machine = dog_machine();
        let dog = Dog::at("Asleep", 3);

        let edge = machine.resolve(&s("KICK"), &dog).unwrap();

        assert_eq!(edge.target_state(), "Barking");
        assert_eq!(dog.state, "Asleep");
        assert!(machine.can_fire(&s("KICK"), &dog));
        assert!(!machine.can_fire(&s("FEED"), &dog));
    }

    #[test]
    fn permitted_events_include_inherited_and_respect_guards() {
        let machine = dog_machine();

        assert_eq!(
            machine.permitted_events(&Dog::at("Barking", 1)),
            vec![s("FEED"), s("SLAP")]
        );
        assert_eq!(machine.permitted_events(&Dog::at("Eating", 1)), Vec::<String>::new());
    }

    #[test]
    fn hierarchy_queries() {
        let machine = dog_machine();

        assert_eq!(machine.parent_of(&s("Barking")), Some(&s("Awake")));
        assert_eq!(machine.ancestors(&s("Biting")), vec![&s("Awake")]);
        assert!(machine.is_in_state(&s("Barking"), &s("Awake")));
        assert!(machine.is_in_state(&s("Awake"), &s("Awake")));
        assert!(!machine.is_in_state(&s("Asleep"), &s("Awake")));
        assert_eq!(machine.initial_state(), "Asleep");
        assert_eq!(machine.edges_from(&s("Eating")).len(), 0);
    }
}
