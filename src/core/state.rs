//! State identifiers for machine definitions.
//!
//! A state identifier is an opaque, comparable tag drawn from a closed set
//! defined per machine. Enums are the natural fit.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state identifiers.
///
/// All methods are pure. The identifier says nothing about the data a flow
/// carries; that lives in the machine context.
///
/// # Example
///
/// ```rust
/// use flowstate::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Step {
///     Cart,
///     Shipping,
///     Complete,
///     Error,
/// }
///
/// impl State for Step {
///     fn name(&self) -> &str {
///         match self {
///             Self::Cart => "cart",
///             Self::Shipping => "shipping",
///             Self::Complete => "complete",
///             Self::Error => "error",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Complete)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Error)
///     }
/// }
///
/// assert_eq!(Step::Shipping.name(), "shipping");
/// assert!(Step::Complete.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Display name used in diagnostics and checkpoints.
    fn name(&self) -> &str;

    /// Whether the flow is expected to stop here.
    ///
    /// Purely informational: the interpreter still honours any transitions
    /// a definition declares on a final state.
    fn is_final(&self) -> bool {
        false
    }

    /// Whether this state represents a failure the UI should surface.
    fn is_error(&self) -> bool {
        false
    }
}
