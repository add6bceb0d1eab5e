//! Identifier traits for states and events.
//!
//! The engine imposes no structure on identifiers beyond equality, ordering
//! and a display name. Ordering keeps every internal collection deterministic.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state identifiers.
///
/// # Required Traits
///
/// - `Clone`: states are copied into edges and transition records
/// - `Eq` + `Ord` + `Hash`: states key the adjacency and hierarchy maps
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: transition records and definitions are serializable
///
/// # Example
///
/// ```rust
/// use krsm::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
/// enum CatState {
///     Sleeping,
///     Purring,
/// }
///
/// impl State for CatState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Sleeping => "Sleeping",
///             Self::Purring => "Purring",
///         }
///     }
/// }
///
/// assert_eq!(CatState::Purring.name(), "Purring");
/// ```
pub trait State:
    Clone + Eq + Ord + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// Trait for event identifiers.
///
/// Carries the same bounds as [`State`]; events are stored on edges and
/// copied into every transition record.
pub trait Event:
    Clone + Eq + Ord + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}

impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl Event for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}
