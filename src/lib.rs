//! krsm: hierarchical finite state machines for driving resources
//!
//! A machine is declared once with a fluent builder and then used as a pure,
//! synchronous decision function: given a resource and an event it finds the
//! applicable edge, searching the resource's state first and then each of its
//! ancestors, and advances the resource.
//!
//! # Core Concepts
//!
//! - **State / Event**: caller-defined, totally ordered identifiers
//! - **Guards**: pure predicates over the resource that gate edges
//! - **Builder**: collects every structural problem before refusing to build
//! - **StateMachine**: immutable, shareable, first-match-wins resolution
//! - **Resource**: the domain entity whose state the machine advances
//!
//! # Example
//!
//! ```rust
//! use krsm::core::{Resource, Transition};
//! use krsm::{event_enum, state_enum, StateMachineBuilder};
//!
//! state_enum! {
//!     pub enum CatState {
//!         Sleeping,
//!         Purring,
//!         Scratching,
//!         Biting,
//!     }
//! }
//!
//! event_enum! {
//!     pub enum CatEvent {
//!         Pet,
//!         Hit,
//!     }
//! }
//!
//! struct Cat {
//!     state: CatState,
//! }
//!
//! impl Resource<CatState, CatEvent> for Cat {
//!     fn name(&self) -> &str { "tom" }
//!     fn namespace(&self) -> &str { "house" }
//!     fn current_state(&self) -> CatState { self.state }
//!     fn set_transition(&mut self, transition: Transition<CatState, CatEvent>) {
//!         self.state = transition.target_state;
//!     }
//! }
//!
//! let machine = StateMachineBuilder::<CatState, CatEvent, Cat>::new("CatMachine")
//!     .configure_state(CatState::Sleeping)
//!     .target(CatState::Purring, [CatEvent::Pet])
//!     .target(CatState::Scratching, [CatEvent::Hit])
//!     .configure_state(CatState::Purring)
//!     .target(CatState::Sleeping, [CatEvent::Pet])
//!     .target(CatState::Biting, [CatEvent::Hit])
//!     .build()
//!     .unwrap();
//!
//! let mut cat = Cat { state: CatState::Sleeping };
//! let transition = machine.trigger(CatEvent::Pet, &mut cat, "So fluffy!").unwrap();
//!
//! assert_eq!(transition.source_state, CatState::Sleeping);
//! assert_eq!(cat.state, CatState::Purring);
//! ```

pub mod builder;
pub mod core;
pub mod definition;
pub mod error;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, BuildErrors, StateConfigurator, StateMachineBuilder};
pub use crate::core::{Event, Guard, Resource, State, Transition, TransitionHistory};
pub use definition::{DefinitionError, GuardRegistry, MachineDefinition};
pub use error::{Error, ErrorKind};
pub use machine::{Clock, Edge, FixedClock, StateMachine, SystemClock, TriggerError};
