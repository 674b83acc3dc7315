//! Guard predicates for controlling transitions.
//!
//! Guards are pure boolean functions over the machine context. A guard that
//! returns `false` leaves the machine exactly where it was.

use std::fmt;
use std::sync::Arc;

/// Pure predicate that determines if a transition can fire.
///
/// Guards see the *current* context, before any exit or transition action
/// has run.
///
/// # Example
///
/// ```rust
/// use flowstate::core::Guard;
///
/// struct Cart {
///     items: Vec<String>,
/// }
///
/// let has_items = Guard::new(|cart: &Cart| !cart.items.is_empty());
///
/// assert!(!has_items.check(&Cart { items: vec![] }));
/// assert!(has_items.check(&Cart { items: vec!["mug".into()] }));
/// ```
pub struct Guard<C> {
    predicate: Arc<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard against a context.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
