//! Builder for constructing transition records.

use crate::core::{Action, Guard};
use crate::definition::error::BuildError;
use crate::definition::node::TransitionRecord;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S, C, E> {
    target: Option<S>,
    guard: Option<Guard<C>>,
    actions: Vec<Action<C, E>>,
}

impl<S, C: 'static, E: 'static> TransitionBuilder<S, C, E> {
    pub fn new() -> Self {
        Self {
            target: None,
            guard: None,
            actions: Vec::new(),
        }
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.target = Some(state);
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<C>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Append an action; actions run in the order they were added.
    pub fn action(mut self, action: Action<C, E>) -> Self {
        self.actions.push(action);
        self
    }

    /// Append a context update that ignores the event.
    pub fn assign<F>(self, f: F) -> Self
    where
        F: Fn(C) -> C + Send + Sync + 'static,
    {
        self.action(Action::new(f))
    }

    /// Append a context update that reads the event payload.
    pub fn assign_with_event<F>(self, f: F) -> Self
    where
        F: Fn(C, &E) -> C + Send + Sync + 'static,
    {
        self.action(Action::with_event(f))
    }

    pub fn build(self) -> Result<TransitionRecord<S, C, E>, BuildError> {
        let target = self.target.ok_or(BuildError::MissingTarget)?;

        Ok(TransitionRecord {
            target,
            guard: self.guard,
            actions: self.actions,
        })
    }
}

impl<S, C: 'static, E: 'static> Default for TransitionBuilder<S, C, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Ev;

    #[test]
    fn builder_requires_target() {
        let result = TransitionBuilder::<&str, u32, Ev>::new().when(|n| *n > 0).build();
        assert!(matches!(result, Err(BuildError::MissingTarget)));
    }

    #[test]
    fn fluent_api_builds_record() {
        let record = TransitionBuilder::<&str, u32, Ev>::new()
            .to("done")
            .when(|n| *n < 3)
            .assign(|n| n + 1)
            .assign(|n| n * 10)
            .build()
            .unwrap();

        assert_eq!(record.target, "done");
        assert_eq!(record.actions.len(), 2);
        assert!(record.guard.as_ref().is_some_and(|g| g.check(&2)));
        assert!(record.guard.as_ref().is_some_and(|g| !g.check(&3)));
    }

    #[test]
    fn guard_is_optional() {
        let record = TransitionBuilder::<&str, u32, Ev>::new()
            .to("anywhere")
            .build()
            .unwrap();

        assert!(record.guard.is_none());
        assert!(record.actions.is_empty());
    }
}
