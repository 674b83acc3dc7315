//! State nodes and the transition entries they hold.

use crate::core::{Action, Guard};

/// Fully specified transition.
pub struct TransitionRecord<S, C, E> {
    pub target: S,
    pub guard: Option<Guard<C>>,
    pub actions: Vec<Action<C, E>>,
}

/// One entry of a state node's transition table.
///
/// Definitions may name a bare target or a full record; the resolver
/// normalizes both into the same shape.
pub enum TransitionConfig<S, C, E> {
    Target(S),
    Record(TransitionRecord<S, C, E>),
}

impl<S, C, E> TransitionConfig<S, C, E> {
    pub fn target(&self) -> &S {
        match self {
            Self::Target(target) => target,
            Self::Record(record) => &record.target,
        }
    }
}

/// Per-state configuration: transition table plus entry and exit actions.
///
/// The table keeps insertion order, which is the order `next_events`
/// reports. Declaring the same event type twice replaces the earlier entry.
pub struct StateNode<S, C, E> {
    on: Vec<(String, TransitionConfig<S, C, E>)>,
    entry: Vec<Action<C, E>>,
    exit: Vec<Action<C, E>>,
}

impl<S, C, E> Default for StateNode<S, C, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, C, E> StateNode<S, C, E> {
    /// A node with no transitions and no actions (a terminal state).
    pub fn new() -> Self {
        Self {
            on: Vec::new(),
            entry: Vec::new(),
            exit: Vec::new(),
        }
    }

    /// Handle `event_type` by moving to `target`.
    pub fn on(self, event_type: impl Into<String>, target: S) -> Self {
        self.with_config(event_type, TransitionConfig::Target(target))
    }

    /// Handle `event_type` with a full transition record.
    pub fn on_record(self, event_type: impl Into<String>, record: TransitionRecord<S, C, E>) -> Self {
        self.with_config(event_type, TransitionConfig::Record(record))
    }

    /// Handle `event_type` with a transition from a builder.
    /// Returns an error if the builder fails validation.
    pub fn on_transition(
        self,
        event_type: impl Into<String>,
        builder: super::TransitionBuilder<S, C, E>,
    ) -> Result<Self, super::BuildError>
    where
        C: 'static,
        E: 'static,
    {
        let record = builder.build()?;
        Ok(self.on_record(event_type, record))
    }

    pub fn entry(mut self, action: Action<C, E>) -> Self {
        self.entry.push(action);
        self
    }

    pub fn exit(mut self, action: Action<C, E>) -> Self {
        self.exit.push(action);
        self
    }

    fn with_config(mut self, event_type: impl Into<String>, config: TransitionConfig<S, C, E>) -> Self {
        let event_type = event_type.into();
        match self.on.iter_mut().find(|(key, _)| *key == event_type) {
            Some(slot) => slot.1 = config,
            None => self.on.push((event_type, config)),
        }
        self
    }

    pub fn transition_for(&self, event_type: &str) -> Option<&TransitionConfig<S, C, E>> {
        self.on
            .iter()
            .find(|(key, _)| key == event_type)
            .map(|(_, config)| config)
    }

    pub fn handles(&self, event_type: &str) -> bool {
        self.transition_for(event_type).is_some()
    }

    pub fn event_types(&self) -> impl Iterator<Item = &str> {
        self.on.iter().map(|(key, _)| key.as_str())
    }

    pub fn transitions(&self) -> impl Iterator<Item = (&str, &TransitionConfig<S, C, E>)> {
        self.on.iter().map(|(key, config)| (key.as_str(), config))
    }

    pub fn entry_actions(&self) -> &[Action<C, E>] {
        &self.entry
    }

    pub fn exit_actions(&self) -> &[Action<C, E>] {
        &self.exit
    }

    pub fn is_terminal(&self) -> bool {
        self.on.is_empty()
    }
}
