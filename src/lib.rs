//! Flowstate: a pure functional finite-state-machine interpreter for UI flows
//!
//! Flowstate follows a "pure core, imperative shell" split. Definitions are
//! static, validated data; the interpreter is a pure function from
//! `(state, event)` to the next state; the runtime is the thin stateful
//! shell that owns one flow instance and reports diagnostics.
//!
//! # Core Concepts
//!
//! - **State**: closed set of identifiers via the `State` trait
//! - **Event**: tagged events via the `Event` trait
//! - **Guards and actions**: pure predicates and context transformers
//! - **Definition**: per-state transition tables with entry and exit actions
//! - **Runtime**: `send`, `matches`, `can`, `next_events`
//!
//! # Example
//!
//! ```rust
//! use flowstate::machines::{checkout_machine, CartItem, CheckoutContext, CheckoutEvent, CheckoutState};
//! use flowstate::runtime::Runtime;
//! use std::sync::Arc;
//!
//! let machine = checkout_machine(CheckoutContext::default()).unwrap();
//! let mut checkout = Runtime::new(Arc::new(machine));
//!
//! // An empty cart cannot proceed.
//! checkout.send(CheckoutEvent::Proceed);
//! assert!(checkout.matches(&CheckoutState::Cart));
//!
//! checkout.send(CheckoutEvent::AddItem(CartItem {
//!     id: "mug".into(),
//!     name: "Mug".into(),
//!     price_cents: 1250,
//!     quantity: 1,
//! }));
//! checkout.send(CheckoutEvent::Proceed);
//!
//! assert!(checkout.matches(&CheckoutState::Shipping));
//! assert!(checkout.can("BACK"));
//! assert_eq!(checkout.next_events(), vec!["NEXT", "BACK"]);
//! ```

pub mod checkpoint;
pub mod config;
pub mod core;
pub mod definition;
pub mod interpreter;
pub mod machines;
pub mod runtime;

// Re-export commonly used types
pub use crate::core::{Action, Event, Guard, State, StateHistory, StateTransition};
pub use definition::{BuildError, MachineBuilder, MachineDefinition, StateNode, TransitionBuilder};
pub use interpreter::{transition, MachineState, Step};
pub use runtime::{Observer, Runtime};
