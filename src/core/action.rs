//! Context transformers run on exit, on a transition, and on entry.

use std::fmt;
use std::sync::Arc;

type ActionFn<C, E> = Arc<dyn Fn(C, &E) -> C + Send + Sync>;

/// A context transformer.
///
/// An action consumes the context produced by the previous step and returns
/// the context for the next one. Leaving the context unchanged means
/// returning it as received.
///
/// # Example
///
/// ```rust
/// use flowstate::core::Action;
///
/// #[derive(Debug)]
/// struct Submit;
///
/// let bump = Action::<u32, Submit>::new(|n| n + 1);
/// let double = Action::<u32, Submit>::new(|n| n * 2);
///
/// let ctx = double.apply(bump.apply(1, &Submit), &Submit);
/// assert_eq!(ctx, 4);
/// ```
pub struct Action<C, E> {
    run: ActionFn<C, E>,
}

impl<C: 'static, E: 'static> Action<C, E> {
    /// Action that only reads the context.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(C) -> C + Send + Sync + 'static,
    {
        Self {
            run: Arc::new(move |ctx: C, _: &E| f(ctx)),
        }
    }

    /// Action that also reads the payload of the triggering event.
    pub fn with_event<F>(f: F) -> Self
    where
        F: Fn(C, &E) -> C + Send + Sync + 'static,
    {
        Self { run: Arc::new(f) }
    }
}

impl<C, E> Action<C, E> {
    pub fn apply(&self, context: C, event: &E) -> C {
        (self.run)(context, event)
    }
}

/// Thread `context` through `actions` in order.
pub fn run_all<C, E>(actions: &[Action<C, E>], context: C, event: &E) -> C {
    actions
        .iter()
        .fold(context, |ctx, action| action.apply(ctx, event))
}

impl<C, E> Clone for Action<C, E> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<C, E> fmt::Debug for Action<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}
