//! Core types shared by the builder and the runtime machine.
//!
//! - Identifier traits for states and events
//! - Guard predicates over resources
//! - Transition records and history
//! - The `Resource` capability a domain entity implements

mod guard;
mod history;
mod resource;
mod state;

pub use guard::{not, Guard};
pub use history::{Transition, TransitionHistory};
pub use resource::Resource;
pub use state::{Event, State};
