//! The single-step reducer `(state, event) -> state`.

use crate::core::{run_all, Event, State};
use crate::definition::MachineDefinition;
use crate::interpreter::resolve::{resolve, ResolvedTransition};
use crate::interpreter::snapshot::MachineState;

/// Outcome of applying one event.
///
/// Every variant carries the resulting runtime state. Unhandled events and
/// blocked guards hand back the input state untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum Step<S, C> {
    /// Moved from `from` into `state`'s value (possibly the same state).
    Transitioned { from: S, state: MachineState<S, C> },

    /// The current state has no transition for the event.
    Unhandled(MachineState<S, C>),

    /// A transition exists but its guard rejected the current context.
    Blocked {
        target: S,
        state: MachineState<S, C>,
    },
}

impl<S, C> Step<S, C> {
    pub fn state(&self) -> &MachineState<S, C> {
        match self {
            Self::Transitioned { state, .. } | Self::Unhandled(state) | Self::Blocked { state, .. } => {
                state
            }
        }
    }

    pub fn into_state(self) -> MachineState<S, C> {
        match self {
            Self::Transitioned { state, .. } | Self::Unhandled(state) | Self::Blocked { state, .. } => {
                state
            }
        }
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

/// Apply `event` to `state`.
///
/// Order of effects on a taken transition: exit actions of the current
/// node, then the transition's own actions, then entry actions of the
/// target node. Each action receives the context returned by the previous
/// one. Pure and deterministic; it never logs or performs I/O.
///
/// # Example
///
/// ```
/// use flowstate::core::{Action, Event};
/// use flowstate::definition::{MachineBuilder, StateNode};
/// use flowstate::interpreter::{transition, Step};
/// use flowstate::state_enum;
///
/// state_enum! {
///     enum Door {
///         Closed,
///         Open,
///     }
/// }
///
/// #[derive(Debug)]
/// enum DoorEvent {
///     Push,
///     Knock,
/// }
///
/// impl Event for DoorEvent {
///     fn event_type(&self) -> &str {
///         match self {
///             Self::Push => "PUSH",
///             Self::Knock => "KNOCK",
///         }
///     }
/// }
///
/// let door = MachineBuilder::new("door")
///     .initial(Door::Closed)
///     .context(0u32)
///     .state(Door::Closed, StateNode::new().on("PUSH", Door::Open))
///     .state(
///         Door::Open,
///         StateNode::new().entry(Action::new(|opened: u32| opened + 1)),
///     )
///     .build()
///     .unwrap();
///
/// let knocked = transition(&door, door.initial_state(), &DoorEvent::Knock);
/// assert!(matches!(knocked, Step::Unhandled(_)));
///
/// let pushed = transition(&door, knocked.into_state(), &DoorEvent::Push).into_state();
/// assert!(pushed.matches(&Door::Open));
/// assert_eq!(*pushed.context(), 1);
/// ```
pub fn transition<S, C, E>(
    definition: &MachineDefinition<S, C, E>,
    state: MachineState<S, C>,
    event: &E,
) -> Step<S, C>
where
    S: State,
    E: Event,
{
    match decide(definition, &state, event) {
        Decision::Unhandled => Step::Unhandled(state),
        Decision::Blocked { target } => Step::Blocked {
            target: target.clone(),
            state,
        },
        Decision::Take(resolved) => {
            let from = state.value().clone();
            Step::Transitioned {
                from,
                state: apply(definition, &resolved, state, event),
            }
        }
    }
}

/// What an event would do from a state, decided without running actions.
#[derive(Debug)]
pub enum Decision<'a, S, C, E> {
    Unhandled,
    Blocked { target: &'a S },
    Take(ResolvedTransition<'a, S, C, E>),
}

/// Resolve `event` and evaluate its guard against a borrowed state.
///
/// Nothing is cloned, so callers holding the state by reference can skip
/// unhandled and blocked events without copying the context.
pub fn decide<'a, S, C, E>(
    definition: &'a MachineDefinition<S, C, E>,
    state: &MachineState<S, C>,
    event: &E,
) -> Decision<'a, S, C, E>
where
    S: State,
    E: Event,
{
    let Some(resolved) = resolve(definition, state.value(), event) else {
        return Decision::Unhandled;
    };

    match resolved.guard {
        Some(guard) if !guard.check(state.context()) => Decision::Blocked {
            target: resolved.target,
        },
        _ => Decision::Take(resolved),
    }
}

/// Run exit, transition and entry actions for a decided transition.
pub fn apply<S, C, E>(
    definition: &MachineDefinition<S, C, E>,
    resolved: &ResolvedTransition<'_, S, C, E>,
    state: MachineState<S, C>,
    event: &E,
) -> MachineState<S, C>
where
    S: State,
    E: Event,
{
    let target = resolved.target.clone();
    let (from, context) = state.into_parts();

    let exit = definition
        .node(&from)
        .map(|node| node.exit_actions())
        .unwrap_or_default();
    let entry = definition
        .node(&target)
        .map(|node| node.entry_actions())
        .unwrap_or_default();

    let context = run_all(exit, context, event);
    let context = run_all(resolved.actions, context, event);
    let context = run_all(entry, context, event);

    MachineState::new(target, context)
}

impl<S: State, C: Clone, E: Event> MachineDefinition<S, C, E> {
    /// Apply `event` to a borrowed state, returning the next state.
    ///
    /// An unhandled or guarded-out event yields a copy of the input.
    pub fn transition(&self, state: &MachineState<S, C>, event: &E) -> MachineState<S, C> {
        transition(self, state.clone(), event).into_state()
    }
}
