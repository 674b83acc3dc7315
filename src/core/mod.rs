//! Core primitives.
//!
//! - State identifiers via the `State` trait
//! - Events via the `Event` trait
//! - Guard predicates and context actions
//! - Immutable history tracking
//!
//! Nothing in this module performs I/O or holds mutable state.

mod action;
mod event;
mod guard;
mod history;
mod state;

pub use action::{run_all, Action};
pub use event::Event;
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
