//! State transition history tracking.
//!
//! History only ever grows, and recording returns a new value instead of
//! mutating the old one.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state change.
///
/// Only operations that actually moved the machine produce a record; an
/// operation rejected in its current state leaves no trace here.
///
/// # Example
///
/// ```rust
/// use orderstate::core::StateTransition;
/// use orderstate::order::OrderState;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: OrderState::PaymentPending,
///     to: OrderState::BeingPrepared,
///     operation: "verify-payment".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.operation, "verify-payment");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// Name of the operation that caused the change
    pub operation: String,
    /// When the change happened
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions.
///
/// # Example
///
/// ```rust
/// use orderstate::core::{StateHistory, StateTransition};
/// use orderstate::order::OrderState;
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: OrderState::PaymentPending,
///         to: OrderState::BeingPrepared,
///         operation: "verify-payment".to_string(),
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: OrderState::BeingPrepared,
///         to: OrderState::Shipped,
///         operation: "ship".to_string(),
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(
///     path,
///     vec![
///         &OrderState::PaymentPending,
///         &OrderState::BeingPrepared,
///         &OrderState::Shipped,
///     ]
/// );
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
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of states traversed.
    ///
    /// The first element is the `from` of the first transition, followed by
    /// the `to` of every transition. An empty history has an empty path.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time elapsed between the first and the last transition.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    /// All transitions, oldest first.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
