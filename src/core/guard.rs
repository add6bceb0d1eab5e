//! Guard predicates for gating edges.
//!
//! Guards are pure boolean functions over the resource being transitioned.
//! They decide whether an edge is eligible; they never mutate the resource.

use std::fmt;
use std::ops::Not;
use std::sync::Arc;

type Predicate<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// Pure predicate that determines if an edge can be taken.
///
/// Guards are evaluated while scanning a state's edges. A guard returning
/// `false` only skips its own edge; scanning continues with the next edge.
/// The engine performs no timeout enforcement, so predicates must return
/// promptly and must not have observable side effects.
///
/// # Example
///
/// ```rust
/// use krsm::core::Guard;
///
/// struct Dog {
///     age: u32,
/// }
///
/// let puppy = Guard::new(|dog: &Dog| dog.age < 10);
///
/// assert!(puppy.check(&Dog { age: 1 }));
/// assert!(!puppy.check(&Dog { age: 10 }));
/// assert!(puppy.negate().check(&Dog { age: 10 }));
/// ```
pub struct Guard<R> {
    predicate: Predicate<R>,
}

impl<R: 'static> Guard<R> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync),
    /// since a built machine is shared across threads.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard against a resource.
    pub fn check(&self, resource: &R) -> bool {
        (self.predicate)(resource)
    }

    /// Guard returning the logical negation of this one.
    ///
    /// Paired with the original it expresses an if/else over the same
    /// `(state, event)`.
    pub fn negate(&self) -> Self {
        let inner = Arc::clone(&self.predicate);
        Guard::new(move |resource: &R| !inner(resource))
    }

    /// Guard passing only when both guards pass. `other` is not evaluated
    /// when `self` fails.
    pub fn and(&self, other: &Guard<R>) -> Self {
        let left = Arc::clone(&self.predicate);
        let right = Arc::clone(&other.predicate);
        Guard::new(move |resource: &R| left(resource) && right(resource))
    }

    /// Guard passing when either guard passes. `other` is not evaluated
    /// when `self` passes.
    pub fn or(&self, other: &Guard<R>) -> Self {
        let left = Arc::clone(&self.predicate);
        let right = Arc::clone(&other.predicate);
        Guard::new(move |resource: &R| left(resource) || right(resource))
    }
}

/// Free-function form of [`Guard::negate`].
pub fn not<R: 'static>(guard: &Guard<R>) -> Guard<R> {
    guard.negate()
}

impl<R: 'static> Not for Guard<R> {
    type Output = Guard<R>;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl<R> Clone for Guard<R> {
    fn clone(&self) -> Self {
        Guard {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<R> fmt::Debug for Guard<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
