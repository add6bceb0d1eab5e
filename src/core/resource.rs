//! The capability a domain entity exposes to be driven by a machine.

use super::history::Transition;
use super::state::{Event, State};

/// An externally owned entity whose state a machine reads and advances.
///
/// The machine never owns a resource. It reads [`current_state`] and, once an
/// edge is fully resolved, calls [`set_transition`] exactly once.
///
/// `set_transition` must both record the transition and move the resource
/// to `transition.target_state`. Implementors sharing a resource across
/// threads are responsible for making that pair atomic.
///
/// [`current_state`]: Resource::current_state
/// [`set_transition`]: Resource::set_transition
///
/// # Example
///
/// ```rust
/// use krsm::core::{Resource, Transition};
///
/// struct Job {
///     name: String,
///     state: String,
///     last: Option<Transition<String, String>>,
/// }
///
/// impl Resource<String, String> for Job {
///     fn name(&self) -> &str {
///         &self.name
///     }
///
///     fn namespace(&self) -> &str {
///         "default"
///     }
///
///     fn current_state(&self) -> String {
///         self.state.clone()
///     }
///
///     fn set_transition(&mut self, transition: Transition<String, String>) {
///         self.state = transition.target_state.clone();
///         self.last = Some(transition);
///     }
/// }
///
/// let job = Job { name: "nightly".into(), state: "Queued".into(), last: None };
/// assert_eq!(job.key(), "default/nightly");
/// ```
pub trait Resource<S: State, E: Event> {
    /// Name of the resource, unique within its namespace.
    fn name(&self) -> &str;

    /// Namespace the resource lives in.
    fn namespace(&self) -> &str;

    /// The state the resource is in right now.
    fn current_state(&self) -> S;

    /// Record `transition` and advance to its target state.
    fn set_transition(&mut self, transition: Transition<S, E>);

    /// `namespace/name`, used to identify the resource in logs.
    fn key(&self) -> String {
        format!("{}/{}", self.namespace(), self.name())
    }
}
