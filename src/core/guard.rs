//! Guard predicates for controlling state transitions.
//!
//! Controllers keep their preconditions as guards so the rule ("no second
//! submit while one is in flight", "no paging after exit") is a value that
//! can be checked and tested on its own.

use super::state::State;
use std::fmt;
use std::sync::Arc;

/// Pure predicate that determines if a transition can execute.
///
/// # Example
///
/// ```rust
/// use smartmoney::core::Guard;
/// use smartmoney::session::SessionStatus;
///
/// let idle = Guard::new(|s: &SessionStatus| !matches!(s, SessionStatus::Authenticating));
///
/// assert!(idle.check(&SessionStatus::Anonymous));
/// assert!(!idle.check(&SessionStatus::Authenticating));
/// ```
pub struct Guard<S: State> {
    label: &'static str,
    predicate: Arc<dyn Fn(&S) -> bool + Send + Sync>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Self::labeled("guard", predicate)
    }

    /// Create a guard with a label that shows up in log events.
    pub fn labeled<F>(label: &'static str, predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            label,
            predicate: Arc::new(predicate),
        }
    }

    /// Guard that only passes for non-terminal states.
    pub fn not_final() -> Self {
        Self::labeled("not_final", |s: &S| !s.is_final())
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Check if the guard allows a transition from this state.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl<S: State> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("label", &self.label).finish()
    }
}
