//! The runtime side: built machines, their edges, and trigger resolution.
//!
//! # Key Concepts
//!
//! - **Edges**: `(source, event, target)` arcs, optionally gated by a guard
//! - **State Machine**: immutable graph resolving `(state, event, resource)`
//!   to a transition, inheriting edges from ancestor states
//! - **Clock**: the time source stamped on every transition record
//!
//! Resolution is synchronous and lock-free; it reads the shared graph and
//! mutates only the resource handed to `trigger`.

mod clock;
mod edge;
mod error;
mod state_machine;

pub use clock::{Clock, FixedClock, SystemClock};
pub use edge::Edge;
pub use error::TriggerError;
pub use state_machine::StateMachine;
