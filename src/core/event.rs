//! Events delivered to a running machine.

use std::fmt::Debug;

/// A tagged event.
///
/// `event_type` is the key looked up in a state node's transition table.
/// The same type tag may be handled by several states. Any payload lives in
/// the implementing variant and is visible to actions built with
/// [`Action::with_event`](crate::core::Action::with_event).
///
/// # Example
///
/// ```rust
/// use flowstate::core::Event;
///
/// #[derive(Debug, Clone)]
/// enum ModalEvent {
///     Open,
///     Close,
///     AnimationEnd { duration_ms: u32 },
/// }
///
/// impl Event for ModalEvent {
///     fn event_type(&self) -> &str {
///         match self {
///             Self::Open => "OPEN",
///             Self::Close => "CLOSE",
///             Self::AnimationEnd { .. } => "ANIMATION_END",
///         }
///     }
/// }
///
/// let event = ModalEvent::AnimationEnd { duration_ms: 150 };
/// assert_eq!(event.event_type(), "ANIMATION_END");
/// ```
pub trait Event: Debug + Send + Sync {
    fn event_type(&self) -> &str;
}
