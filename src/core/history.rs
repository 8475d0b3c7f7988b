//! State transition history tracking.
//!
//! Every controller keeps an append-only record of the states it moved
//! through. Recording returns a new history instead of mutating in place.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single state transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

impl<S: State> StateTransition<S> {
    /// Transition stamped with the current wall-clock time.
    pub fn now(from: S, to: S) -> Self {
        Self {
            from,
            to,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of state transitions.
///
/// # Example
///
/// ```rust
/// use smartmoney::core::{StateHistory, StateTransition};
/// use smartmoney::onboarding::OnboardingState;
///
/// let history = StateHistory::new()
///     .record(StateTransition::now(OnboardingState::Page(0), OnboardingState::Page(1)))
///     .record(StateTransition::now(OnboardingState::Page(1), OnboardingState::Exited));
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[2], &OnboardingState::Exited);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The receiver is left untouched.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States traversed in order: the first `from`, then every `to`.
    ///
    /// Empty when nothing has been recorded.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}
