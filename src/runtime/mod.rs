//! Runtime binding: the stateful shell around the pure interpreter.
//!
//! - **Runtime**: owns one flow's `(state, context)` and exposes `send`,
//!   `matches`, `can` and `next_events`
//! - **Observer**: injected diagnostics sink, `tracing` by default
//! - **SharedRuntime**: lock-serialized handle for multi-threaded hosts

mod binding;
mod observer;
mod shared;

pub use binding::Runtime;
pub use observer::{Diagnostic, NoopObserver, Observer, RecordingObserver, TracingObserver};
pub use shared::SharedRuntime;
