//! Declarative machine definitions.
//!
//! A [`MachineDefinition`] describes states, sub-state relations and edges as
//! plain data, so a machine can be shipped as configuration (JSON for
//! readability, binary for compactness). Guards cannot be serialized; edges
//! name them by label and a [`GuardRegistry`] supplies the predicates when
//! the definition is turned into a machine.
//!
//! ```
//! use krsm::definition::{GuardRegistry, MachineDefinition};
//!
//! struct Dog {
//!     age: u32,
//! }
//!
//! let json = r#"{
//!     "name": "DogMachine",
//!     "states": [
//!         { "state": "Barking", "edges": [
//!             { "event": "SLAP", "target": "Biting", "guard": "puppy" },
//!             { "event": "SLAP", "target": "Barking", "guard": "puppy", "negate": true }
//!         ] }
//!     ]
//! }"#;
//!
//! let guards = GuardRegistry::new().register_fn("puppy", |d: &Dog| d.age < 10);
//! let definition: MachineDefinition<String, String> = MachineDefinition::from_json(json).unwrap();
//! let builder = definition.into_builder(&guards).unwrap();
//!
//! assert_eq!(builder.name(), "DogMachine");
//! ```

use crate::builder::StateMachineBuilder;
use crate::core::{Event, Guard, State};
use crate::machine::StateMachine;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub mod error;

pub use error::DefinitionError;

/// Serializable description of a whole machine.
///
/// States are replayed in order, so the first entry is the initial state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineDefinition<S: State, E: Event> {
    pub name: String,
    pub states: Vec<StateDefinition<S, E>>,
}

/// One configured state: top-level when `parent` is absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateDefinition<S: State, E: Event> {
    pub state: S,
    #[serde(default)]
    pub parent: Option<S>,
    #[serde(default)]
    pub edges: Vec<EdgeDefinition<S, E>>,
}

/// One outgoing edge. `guard` is a label looked up in a [`GuardRegistry`];
/// `negate` inverts that guard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct EdgeDefinition<S: State, E: Event> {
    pub event: E,
    pub target: S,
    #[serde(default)]
    pub guard: Option<String>,
    #[serde(default)]
    pub negate: bool,
}

impl<S: State, E: Event> StateDefinition<S, E> {
    pub fn root(state: S) -> Self {
        Self {
            state,
            parent: None,
            edges: Vec::new(),
        }
    }

    pub fn sub_state(state: S, parent: S) -> Self {
        Self {
            state,
            parent: Some(parent),
            edges: Vec::new(),
        }
    }

    pub fn edge(mut self, event: E, target: S) -> Self {
        self.edges.push(EdgeDefinition {
            event,
            target,
            guard: None,
            negate: false,
        });
        self
    }

    pub fn guarded_edge(mut self, event: E, target: S, guard: impl Into<String>, negate: bool) -> Self {
        self.edges.push(EdgeDefinition {
            event,
            target,
            guard: Some(guard.into()),
            negate,
        });
        self
    }
}

impl<S: State, E: Event> MachineDefinition<S, E> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
        }
    }

    pub fn state(mut self, state: StateDefinition<S, E>) -> Self {
        self.states.push(state);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        serde_json::from_str(json).map_err(|e| DefinitionError::DeserializationFailed(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, DefinitionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DefinitionError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, DefinitionError> {
        bincode::deserialize(bytes).map_err(|e| DefinitionError::DeserializationFailed(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, DefinitionError> {
        bincode::serialize(self).map_err(|e| DefinitionError::SerializationFailed(e.to_string()))
    }

    /// Every guard label referenced by an edge.
    pub fn guard_labels(&self) -> BTreeSet<&str> {
        self.states
            .iter()
            .flat_map(|state| state.edges.iter())
            .filter_map(|edge| edge.guard.as_deref())
            .collect()
    }

    /// Replay the definition through a [`StateMachineBuilder`].
    ///
    /// All construction rules apply exactly as for hand-written builders;
    /// their violations surface when the returned builder is built. Labels
    /// missing from `guards` are all reported together.
    pub fn into_builder<R: 'static>(
        self,
        guards: &GuardRegistry<R>,
    ) -> Result<StateMachineBuilder<S, E, R>, DefinitionError> {
        let mut missing = BTreeSet::new();
        let mut builder = StateMachineBuilder::new(self.name);

        for definition in self.states {
            let mut configurator = match definition.parent {
                Some(parent) => builder.configure_sub_state(definition.state, parent),
                None => builder.configure_state(definition.state),
            };
            for edge in definition.edges {
                configurator = match edge.guard {
                    None => configurator.target(edge.target, [edge.event]),
                    Some(label) => match guards.get(&label) {
                        Some(guard) if edge.negate => configurator.target_with_guard(
                            edge.target,
                            edge.event,
                            format!("!{label}"),
                            guard.negate(),
                        ),
                        Some(guard) => configurator.target_with_guard(
                            edge.target,
                            edge.event,
                            label,
                            guard.clone(),
                        ),
                        None => {
                            missing.insert(label);
                            configurator
                        }
                    },
                };
            }
            builder = configurator.done();
        }

        if missing.is_empty() {
            Ok(builder)
        } else {
            Err(DefinitionError::UnknownGuards {
                labels: missing.into_iter().collect(),
            })
        }
    }

    /// Replay the definition and build the machine.
    pub fn build<R: 'static>(
        self,
        guards: &GuardRegistry<R>,
    ) -> Result<StateMachine<S, E, R>, DefinitionError> {
        Ok(self.into_builder(guards)?.build()?)
    }
}

/// Guards available to definitions, keyed by label.
pub struct GuardRegistry<R> {
    guards: BTreeMap<String, Guard<R>>,
}

impl<R: 'static> GuardRegistry<R> {
    pub fn new() -> Self {
        Self {
            guards: BTreeMap::new(),
        }
    }

    /// Register `guard` under `label`, replacing any previous entry.
    pub fn register(mut self, label: impl Into<String>, guard: Guard<R>) -> Self {
        self.guards.insert(label.into(), guard);
        self
    }

    pub fn register_fn<F>(self, label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.register(label, Guard::new(predicate))
    }

    pub fn get(&self, label: &str) -> Option<&Guard<R>> {
        self.guards.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.guards.keys().map(String::as_str)
    }
}

impl<R: 'static> Default for GuardRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}
