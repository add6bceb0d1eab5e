//! Builder for constructing state machines.

use crate::builder::configurator::StateConfigurator;
use crate::builder::error::{BuildError, BuildErrors};
use crate::core::{Event, State};
use crate::machine::{Clock, Edge, StateMachine, SystemClock};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of one structural check. Failures accumulate until `build()`.
type Check = Validation<(), NonEmptyVec<BuildError>>;

/// Builder for constructing state machines with a fluent API.
///
/// Configuration never stops at the first problem: each malformed
/// declaration is recorded and construction carries on, so a single
/// [`build`](StateMachineBuilder::build) reports every violation at once.
///
/// # Example
///
/// ```rust
/// use krsm::builder::StateMachineBuilder;
/// use krsm::core::{Resource, Transition};
///
/// struct Cat {
///     state: String,
/// }
///
/// impl Resource<String, String> for Cat {
///     fn name(&self) -> &str { "tom" }
///     fn namespace(&self) -> &str { "house" }
///     fn current_state(&self) -> String { self.state.clone() }
///     fn set_transition(&mut self, transition: Transition<String, String>) {
///         self.state = transition.target_state;
///     }
/// }
///
/// let s = |name: &str| name.to_string();
///
/// let machine = StateMachineBuilder::<String, String, Cat>::new("CatMachine")
///     .configure_state(s("Sleeping"))
///     .target(s("Purring"), [s("PET")])
///     .configure_state(s("Purring"))
///     .target(s("Sleeping"), [s("PET")])
///     .build()
///     .unwrap();
///
/// let mut cat = Cat { state: s("Sleeping") };
/// let transition = machine.trigger(s("PET"), &mut cat, "So fluffy!").unwrap();
///
/// assert_eq!(transition.target_state, "Purring");
/// assert_eq!(cat.state, "Purring");
/// ```
pub struct StateMachineBuilder<S: State, E: Event, R> {
    name: String,
    states: Vec<S>,
    known: BTreeSet<S>,
    roots: BTreeSet<S>,
    parents: BTreeMap<S, S>,
    edges: BTreeMap<S, Vec<Edge<S, E, R>>>,
    checks: Vec<Check>,
    clock: Arc<dyn Clock>,
}

impl<S: State, E: Event, R: 'static> StateMachineBuilder<S, E, R> {
    /// Create a new builder for a machine called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            known: BTreeSet::new(),
            roots: BTreeSet::new(),
            parents: BTreeMap::new(),
            edges: BTreeMap::new(),
            checks: Vec::new(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Use `clock` to stamp transition records (defaults to [`SystemClock`]).
    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configure `state` as a top-level state and declare its edges.
    ///
    /// The first state mentioned during construction is the initial state.
    /// Configuring a state that was already declared as a sub-state is
    /// recorded as an illegal-state error.
    pub fn configure_state(mut self, state: S) -> StateConfigurator<S, E, R> {
        if let Some(parent) = self.parents.get(&state) {
            let error = BuildError::SubStateConfiguredAsRoot {
                state: state.name().to_string(),
                parent: parent.name().to_string(),
            };
            self.reject(error);
        } else {
            self.roots.insert(state.clone());
        }
        self.register(&state);
        StateConfigurator::new(self, state)
    }

    /// Configure `child` as a sub-state of `parent` and declare its edges.
    ///
    /// `child` inherits every edge of `parent` (and of its ancestors) that it
    /// does not match itself. Re-declaring the same parent is a no-op.
    pub fn configure_sub_state(mut self, child: S, parent: S) -> StateConfigurator<S, E, R> {
        if self.roots.contains(&child) {
            let error = BuildError::RootConfiguredAsSubState {
                state: child.name().to_string(),
                parent: parent.name().to_string(),
            };
            self.reject(error);
        } else {
            match self.parents.get(&child) {
                Some(existing) if *existing != parent => {
                    let error = BuildError::ConflictingParent {
                        state: child.name().to_string(),
                        existing: existing.name().to_string(),
                        requested: parent.name().to_string(),
                    };
                    self.reject(error);
                }
                Some(_) => {}
                None => {
                    self.parents.insert(child.clone(), parent.clone());
                }
            }
        }
        self.register(&child);
        self.register(&parent);
        StateConfigurator::new(self, child)
    }

    /// Validate the configuration and produce an immutable machine.
    ///
    /// Returns every error recorded during configuration together with the
    /// final checks: the initial state must declare an outgoing edge of its
    /// own and the hierarchy must not contain cycles.
    pub fn build(mut self) -> Result<StateMachine<S, E, R>, BuildErrors> {
        let initial = self.check_initial_state();
        self.checks.push(initial);
        let hierarchy = self.check_hierarchy();
        self.checks.extend(hierarchy);

        match Validation::all_vec(self.checks) {
            Validation::Success(_) => {
                tracing::debug!(
                    machine = %self.name,
                    states = self.states.len(),
                    edges = self.edges.values().map(Vec::len).sum::<usize>(),
                    "state machine built"
                );
                Ok(StateMachine::from_parts(
                    self.name,
                    self.states,
                    self.edges,
                    self.parents,
                    self.clock,
                ))
            }
            Validation::Failure(errors) => {
                let errors = BuildErrors::new(self.name, errors.iter().cloned().collect());
                tracing::warn!(
                    machine = %errors.machine(),
                    errors = errors.len(),
                    "state machine construction failed"
                );
                Err(errors)
            }
        }
    }

    /// Append `edge` to its source's list unless the same arc already exists.
    pub(crate) fn add_edge(&mut self, edge: Edge<S, E, R>) {
        self.register(edge.source_state());
        self.register(edge.target_state());

        let edges = self.edges.entry(edge.source_state().clone()).or_default();
        if edges.iter().any(|existing| existing.same_arc(&edge)) {
            self.checks.push(Validation::fail(BuildError::DuplicateEdge {
                edge: edge.to_string(),
            }));
            return;
        }
        edges.push(edge);
    }

    fn register(&mut self, state: &S) {
        if self.known.insert(state.clone()) {
            self.states.push(state.clone());
        }
    }

    fn reject(&mut self, error: BuildError) {
        self.checks.push(Validation::fail(error));
    }

    fn check_initial_state(&self) -> Check {
        let Some(initial) = self.states.first() else {
            return Validation::fail(BuildError::NoStates);
        };
        // only edges declared on the initial state itself count
        if self.edges.get(initial).is_some_and(|edges| !edges.is_empty()) {
            Validation::success(())
        } else {
            Validation::fail(BuildError::NoOutEdges {
                state: initial.name().to_string(),
            })
        }
    }

    /// One failure per distinct cycle in the parent map, in declaration order.
    fn check_hierarchy(&self) -> Vec<Check> {
        let mut checks = Vec::new();
        let mut reported: BTreeSet<&S> = BTreeSet::new();

        for child in self.states.iter().filter(|s| self.parents.contains_key(*s)) {
            if reported.contains(child) {
                continue;
            }
            let mut path = vec![child];
            let mut cursor = self.parents.get(child);
            while let Some(parent) = cursor {
                if reported.contains(parent) {
                    break;
                }
                if let Some(start) = path.iter().position(|s| *s == parent) {
                    let cycle = &path[start..];
                    let mut names: Vec<String> =
                        cycle.iter().map(|s| s.name().to_string()).collect();
                    names.push(parent.name().to_string());
                    checks.push(Validation::fail(BuildError::HierarchyCycle { cycle: names }));
                    reported.extend(cycle.iter().copied());
                    break;
                }
                path.push(parent);
                cursor = self.parents.get(parent);
            }
        }
        checks
    }
}

impl<S: State, E: Event, R> fmt::Debug for StateMachineBuilder<S, E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachineBuilder")
            .field("name", &self.name)
            .field("states", &self.states)
            .field("parents", &self.parents)
            .field("edges", &self.edges.values().map(Vec::len).sum::<usize>())
            .field("checks", &self.checks.len())
            .finish_non_exhaustive()
    }
}
