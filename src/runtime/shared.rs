//! A runtime that several threads can deliver events to.

use crate::core::{Event, State};
use crate::interpreter::MachineState;
use crate::runtime::binding::Runtime;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle serializing access to one [`Runtime`].
///
/// Each `send` holds the lock for the whole step, so concurrent callers see
/// events applied one at a time in lock-acquisition order. A step always
/// replaces the state wholesale, so a panic inside an action leaves the
/// previous state in place and the lock is simply recovered.
pub struct SharedRuntime<S: State, C, E: Event> {
    inner: Arc<Mutex<Runtime<S, C, E>>>,
}

impl<S: State, C, E: Event> Clone for SharedRuntime<S, C, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, C, E> SharedRuntime<S, C, E>
where
    S: State + 'static,
    C: Clone,
    E: Event + 'static,
{
    pub fn new(runtime: Runtime<S, C, E>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(runtime)),
        }
    }

    pub fn send(&self, event: E) {
        self.lock().send(event);
    }

    /// Copy of the current `(state, context)`.
    pub fn state(&self) -> MachineState<S, C> {
        self.lock().state().clone()
    }

    pub fn matches(&self, candidate: &S) -> bool {
        self.lock().matches(candidate)
    }

    pub fn can(&self, event_type: &str) -> bool {
        self.lock().can(event_type)
    }

    /// Run `f` against the runtime while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&Runtime<S, C, E>) -> R) -> R {
        f(&self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Runtime<S, C, E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
