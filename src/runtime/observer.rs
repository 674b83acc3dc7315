//! Diagnostics hooks injected into a runtime.

use crate::core::{Event, State};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

/// Receives a callback for every event a runtime processes.
///
/// All methods default to doing nothing, so an observer only implements the
/// outcomes it cares about.
pub trait Observer<S: State, E: Event>: Send + Sync {
    fn on_transition(&self, _machine: &str, _from: &S, _to: &S, _event: &E) {}

    fn on_unhandled(&self, _machine: &str, _state: &S, _event: &E) {}

    fn on_guard_blocked(&self, _machine: &str, _state: &S, _target: &S, _event: &E) {}
}

/// Observer that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl<S: State, E: Event> Observer<S, E> for NoopObserver {}

/// Default observer: emits `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl<S: State, E: Event> Observer<S, E> for TracingObserver {
    fn on_transition(&self, machine: &str, from: &S, to: &S, event: &E) {
        debug!(
            machine,
            from = from.name(),
            to = to.name(),
            event = event.event_type(),
            "transition applied"
        );
    }

    fn on_unhandled(&self, machine: &str, state: &S, event: &E) {
        warn!(
            machine,
            state = state.name(),
            event = event.event_type(),
            "unhandled event in state"
        );
    }

    fn on_guard_blocked(&self, machine: &str, state: &S, target: &S, event: &E) {
        warn!(
            machine,
            state = state.name(),
            target = target.name(),
            event = event.event_type(),
            "guard blocked transition"
        );
    }
}

/// A recorded diagnostic, by state and event names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    Transitioned {
        machine: String,
        from: String,
        to: String,
        event: String,
    },
    Unhandled {
        machine: String,
        state: String,
        event: String,
    },
    GuardBlocked {
        machine: String,
        state: String,
        target: String,
        event: String,
    },
}

/// Observer that keeps every diagnostic in memory.
///
/// Clones share the same buffer, so keep one clone and hand the other to
/// the runtime.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    diagnostics: Arc<Mutex<Vec<Diagnostic>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn push(&self, diagnostic: Diagnostic) {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}

impl<S: State, E: Event> Observer<S, E> for RecordingObserver {
    fn on_transition(&self, machine: &str, from: &S, to: &S, event: &E) {
        self.push(Diagnostic::Transitioned {
            machine: machine.to_string(),
            from: from.name().to_string(),
            to: to.name().to_string(),
            event: event.event_type().to_string(),
        });
    }

    fn on_unhandled(&self, machine: &str, state: &S, event: &E) {
        self.push(Diagnostic::Unhandled {
            machine: machine.to_string(),
            state: state.name().to_string(),
            event: event.event_type().to_string(),
        });
    }

    fn on_guard_blocked(&self, machine: &str, state: &S, target: &S, event: &E) {
        self.push(Diagnostic::GuardBlocked {
            machine: machine.to_string(),
            state: state.name().to_string(),
            target: target.name().to_string(),
            event: event.event_type().to_string(),
        });
    }
}
