//! Transition history tracking.
//!
//! Provides immutable tracking of the transitions a flow has taken, in the
//! order `send` applied them.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single taken transition.
///
/// Unhandled events and blocked guards are not recorded; only moves the
/// interpreter actually made.
///
/// # Example
///
/// ```rust
/// use flowstate::core::{State, StateTransition};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Modal {
///     Closed,
///     Opening,
/// }
///
/// impl State for Modal {
///     fn name(&self) -> &str {
///         match self {
///             Self::Closed => "closed",
///             Self::Opening => "opening",
///         }
///     }
/// }
///
/// let transition = StateTransition {
///     from: Modal::Closed,
///     to: Modal::Opening,
///     event: "OPEN".to_string(),
///     timestamp: Utc::now(),
///     sequence: 0,
/// };
/// assert_eq!(transition.event, "OPEN");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// Type tag of the event that caused the move
    pub event: String,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
    /// Position of this transition in the flow, starting at zero
    pub sequence: u64,
}

/// Ordered history of transitions.
///
/// History is immutable: `record` returns a new history with the transition
/// appended.
///
/// # Example
///
/// ```rust
/// use flowstate::core::{State, StateHistory, StateTransition};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Phase { One, Two, Three }
///
/// impl State for Phase {
///     fn name(&self) -> &str {
///         match self {
///             Self::One => "One",
///             Self::Two => "Two",
///             Self::Three => "Three",
///         }
///     }
/// }
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: Phase::One,
///         to: Phase::Two,
///         event: "NEXT".into(),
///         timestamp: Utc::now(),
///         sequence: 0,
///     })
///     .record(StateTransition {
///         from: Phase::Two,
///         to: Phase::Three,
///         event: "NEXT".into(),
///         timestamp: Utc::now(),
///         sequence: 1,
///     });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&Phase::One, &Phase::Two, &Phase::Three]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
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
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Record a transition, keeping at most `limit` of the newest entries.
    ///
    /// A limit of zero yields an empty history.
    pub fn record_bounded(&self, transition: StateTransition<S>, limit: usize) -> Self {
        self.record(transition).newest(limit)
    }

    /// Keep only the newest `limit` transitions.
    pub fn newest(mut self, limit: usize) -> Self {
        let excess = self.transitions.len().saturating_sub(limit);
        self.transitions.drain(..excess);
        self
    }

    /// Path of states traversed.
    ///
    /// The `from` state of the oldest retained transition, then the `to`
    /// state of each transition.
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

    /// Time between the first and last retained transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Closed,
        Opening,
        Open,
        Closing,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Closed => "Closed",
                Self::Opening => "Opening",
                Self::Open => "Open",
                Self::Closing => "Closing",
            }
        }
    }

    fn step(from: TestState, to: TestState, sequence: u64) -> StateTransition<TestState> {
        StateTransition {
            from,
            to,
            event: "STEP".to_string(),
            timestamp: Utc::now(),
            sequence,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(step(TestState::Closed, TestState::Opening, 0));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(step(TestState::Closed, TestState::Opening, 0))
            .record(step(TestState::Opening, TestState::Open, 1));

        assert_eq!(
            history.get_path(),
            vec![&TestState::Closed, &TestState::Opening, &TestState::Open]
        );
    }

    #[test]
    fn record_bounded_drops_oldest() {
        let history = StateHistory::new()
            .record_bounded(step(TestState::Closed, TestState::Opening, 0), 2)
            .record_bounded(step(TestState::Opening, TestState::Open, 1), 2)
            .record_bounded(step(TestState::Open, TestState::Closing, 2), 2);

        assert_eq!(history.len(), 2);
        assert_eq!(history.transitions()[0].sequence, 1);
        assert_eq!(history.last().map(|t| t.sequence), Some(2));
        assert_eq!(history.get_path()[0], &TestState::Opening);
    }

    #[test]
    fn record_bounded_with_zero_limit_keeps_nothing() {
        let history =
            StateHistory::new().record_bounded(step(TestState::Closed, TestState::Opening, 0), 0);
        assert!(history.is_empty());
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let history = StateHistory::new().record(step(TestState::Closed, TestState::Opening, 0));
        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(step(TestState::Closed, TestState::Opening, 0));

        let json = serde_json::to_string(&history).unwrap();
        let back: StateHistory<TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(back.len(), 1);
        assert_eq!(back.transitions()[0].event, "STEP");
    }
}
