//! Transition resolution: find and normalize the table entry for an event.

use crate::core::{Action, Event, Guard, State};
use crate::definition::{MachineDefinition, TransitionConfig};

/// A transition table entry normalized to one shape.
///
/// Borrowed from the definition; resolving never allocates or clones.
#[derive(Debug)]
pub struct ResolvedTransition<'a, S, C, E> {
    pub target: &'a S,
    pub guard: Option<&'a Guard<C>>,
    pub actions: &'a [Action<C, E>],
}

/// Resolve the transition for `event` from `state`.
///
/// `None` means the state does not handle the event, which is a normal
/// outcome rather than an error. A bare target resolves to a transition
/// with no guard and no actions.
pub fn resolve<'a, S, C, E>(
    definition: &'a MachineDefinition<S, C, E>,
    state: &S,
    event: &E,
) -> Option<ResolvedTransition<'a, S, C, E>>
where
    S: State,
    E: Event,
{
    let node = definition.node(state)?;
    let config = node.transition_for(event.event_type())?;

    Some(match config {
        TransitionConfig::Target(target) => ResolvedTransition {
            target,
            guard: None,
            actions: Default::default(),
        },
        TransitionConfig::Record(record) => ResolvedTransition {
            target: &record.target,
            guard: record.guard.as_ref(),
            actions: &record.actions,
        },
    })
}
