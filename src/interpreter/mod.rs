//! The pure interpreter.
//!
//! - **Resolver**: finds and normalizes the transition for an event
//! - **Step**: computes the next `(state, context)` pair
//! - **MachineState**: the value each step consumes and produces
//!
//! Nothing here holds state between calls. Callers that deliver events to
//! one flow from several threads must serialize those calls themselves, or
//! use [`SharedRuntime`](crate::runtime::SharedRuntime).

mod resolve;
mod snapshot;
mod step;

pub use resolve::{resolve, ResolvedTransition};
pub use snapshot::MachineState;
pub use step::{apply, decide, transition, Decision, Step};
