//! The live `(state, context)` pair of one flow instance.

use crate::core::State;
use serde::{Deserialize, Serialize};

/// Runtime state of a machine.
///
/// Each step produces a new value; the previous one is never touched again
/// by the interpreter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineState<S, C> {
    value: S,
    context: C,
}

impl<S: State, C> MachineState<S, C> {
    pub fn new(value: S, context: C) -> Self {
        Self { value, context }
    }

    /// Current state identifier.
    pub fn value(&self) -> &S {
        &self.value
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Structural equality against the current state identifier.
    pub fn matches(&self, candidate: &S) -> bool {
        self.value == *candidate
    }

    pub fn into_parts(self) -> (S, C) {
        (self.value, self.context)
    }
}
