//! Builder API for declaring state machines.
//!
//! A machine is declared as one fluent expression: configure a state,
//! declare its edges, move on to the next state, and finish with `build()`.
//! Structural problems are collected rather than raised, and `build()`
//! reports all of them together.
//!
//! ```
//! use krsm::builder::StateMachineBuilder;
//! use krsm::core::{Resource, Transition};
//! use krsm::{event_enum, state_enum, ErrorKind};
//!
//! state_enum! {
//!     enum DogState { Asleep, Awake, Barking, Eating }
//! }
//!
//! event_enum! {
//!     enum DogEvent { Kick, Feed }
//! }
//!
//! struct Dog {
//!     state: DogState,
//! }
//!
//! impl Resource<DogState, DogEvent> for Dog {
//!     fn name(&self) -> &str { "rex" }
//!     fn namespace(&self) -> &str { "kennel" }
//!     fn current_state(&self) -> DogState { self.state }
//!     fn set_transition(&mut self, transition: Transition<DogState, DogEvent>) {
//!         self.state = transition.target_state;
//!     }
//! }
//!
//! let machine = StateMachineBuilder::<DogState, DogEvent, Dog>::new("DogMachine")
//!     .configure_state(DogState::Asleep)
//!     .target(DogState::Barking, [DogEvent::Kick])
//!     .configure_state(DogState::Awake)
//!     .target(DogState::Eating, [DogEvent::Feed])
//!     .configure_sub_state(DogState::Barking, DogState::Awake)
//!     .build()
//!     .unwrap();
//!
//! let mut dog = Dog { state: DogState::Barking };
//! machine.trigger(DogEvent::Feed, &mut dog, "inherited from Awake").unwrap();
//! assert_eq!(dog.state, DogState::Eating);
//!
//! let error = machine.trigger(DogEvent::Kick, &mut dog, "nothing declared").unwrap_err();
//! assert!(error.is(ErrorKind::CouldNotTransition));
//! ```

pub mod configurator;
pub mod error;
pub mod machine;
pub mod macros;

pub use configurator::StateConfigurator;
pub use error::{BuildError, BuildErrors};
pub use machine::StateMachineBuilder;
