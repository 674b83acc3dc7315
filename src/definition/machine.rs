//! Machine definitions and the builder that validates them.

use crate::core::State;
use crate::definition::error::{BuildError, DefinitionError};
use crate::definition::node::StateNode;
use crate::interpreter::MachineState;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Static description of a flow: named states, their nodes, and where a
/// fresh instance starts.
///
/// Only obtainable through [`MachineBuilder::build`], so every instance has
/// a declared initial state and no dangling transition targets.
pub struct MachineDefinition<S: State, C, E> {
    name: String,
    nodes: Vec<(S, StateNode<S, C, E>)>,
    initial: S,
    initial_context: C,
}

impl<S: State, C, E> MachineDefinition<S, C, E> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial(&self) -> &S {
        &self.initial
    }

    pub fn initial_context(&self) -> &C {
        &self.initial_context
    }

    /// Fresh runtime state `(initial, initial_context)`.
    pub fn initial_state(&self) -> MachineState<S, C>
    where
        C: Clone,
    {
        MachineState::new(self.initial.clone(), self.initial_context.clone())
    }

    pub fn node(&self, state: &S) -> Option<&StateNode<S, C, E>> {
        self.nodes
            .iter()
            .find(|(candidate, _)| candidate == state)
            .map(|(_, node)| node)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.node(state).is_some()
    }

    /// Declared states in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.nodes.iter().map(|(state, _)| state)
    }

    /// Whether `state` has a transition table entry for `event_type`.
    ///
    /// Guards are not consulted: a guarded transition counts as available.
    pub fn can(&self, state: &S, event_type: &str) -> bool {
        self.node(state).is_some_and(|node| node.handles(event_type))
    }

    /// Event types handled in `state`, in table order.
    pub fn next_events(&self, state: &S) -> Vec<&str> {
        self.node(state)
            .map(|node| node.event_types().collect())
            .unwrap_or_default()
    }
}

/// Builder for constructing machine definitions with a fluent API.
///
/// # Example
///
/// ```
/// use flowstate::definition::{MachineBuilder, StateNode};
/// use flowstate::core::Event;
/// use flowstate::state_enum;
///
/// state_enum! {
///     enum Light {
///         Green,
///         Yellow,
///         Red,
///     }
/// }
///
/// #[derive(Debug)]
/// struct Timer;
///
/// impl Event for Timer {
///     fn event_type(&self) -> &str {
///         "TIMER"
///     }
/// }
///
/// let machine = MachineBuilder::<Light, (), Timer>::new("traffic-light")
///     .initial(Light::Green)
///     .context(())
///     .state(Light::Green, StateNode::new().on("TIMER", Light::Yellow))
///     .state(Light::Yellow, StateNode::new().on("TIMER", Light::Red))
///     .state(Light::Red, StateNode::new().on("TIMER", Light::Green))
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.next_events(&Light::Red), vec!["TIMER"]);
/// ```
pub struct MachineBuilder<S: State, C, E> {
    name: String,
    initial: Option<S>,
    initial_context: Option<C>,
    nodes: Vec<(S, StateNode<S, C, E>)>,
}

impl<S: State, C, E> MachineBuilder<S, C, E> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial: None,
            initial_context: None,
            nodes: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set the initial context (required).
    pub fn context(mut self, context: C) -> Self {
        self.initial_context = Some(context);
        self
    }

    /// Declare a state and its node.
    pub fn state(mut self, state: S, node: StateNode<S, C, E>) -> Self {
        self.nodes.push((state, node));
        self
    }

    /// Declare a terminal state with no transitions or actions.
    pub fn terminal(self, state: S) -> Self {
        self.state(state, StateNode::new())
    }

    /// Build the definition.
    ///
    /// Required fields are checked first; structural problems are then
    /// collected together and reported as [`BuildError::Invalid`].
    pub fn build(self) -> Result<MachineDefinition<S, C, E>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let initial_context = self
            .initial_context
            .ok_or(BuildError::MissingInitialContext)?;

        if self.nodes.is_empty() {
            return Err(BuildError::NoStates);
        }

        match validate(&self.nodes, &initial) {
            Validation::Success(_) => Ok(MachineDefinition {
                name: self.name,
                nodes: self.nodes,
                initial,
                initial_context,
            }),
            Validation::Failure(errors) => {
                Err(BuildError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }
}

fn validate<S: State, C, E>(
    nodes: &[(S, StateNode<S, C, E>)],
    initial: &S,
) -> Validation<(), NonEmptyVec<DefinitionError>> {
    let declared = |state: &S| nodes.iter().any(|(candidate, _)| candidate == state);
    let mut checks: Vec<Validation<(), NonEmptyVec<DefinitionError>>> = Vec::new();

    let initial_check = if declared(initial) {
        Validation::success(())
    } else {
        Validation::fail(DefinitionError::UnknownInitialState {
            state: initial.name().to_string(),
        })
    };
    checks.push(initial_check);

    for (index, (state, _)) in nodes.iter().enumerate() {
        // Report each duplicate once, at its second declaration.
        let earlier = nodes[..index].iter().filter(|(s, _)| s == state).count();
        if earlier == 1 {
            checks.push(Validation::fail(DefinitionError::DuplicateState {
                state: state.name().to_string(),
            }));
        }
    }

    for (state, node) in nodes {
        for (event, config) in node.transitions() {
            let target = config.target();
            if !declared(target) {
                checks.push(Validation::fail(DefinitionError::DanglingTarget {
                    from: state.name().to_string(),
                    event: event.to_string(),
                    target: target.name().to_string(),
                }));
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Event;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Step {
        Start,
        Middle,
        End,
        Nowhere,
    }

    impl State for Step {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::Middle => "Middle",
                Self::End => "End",
                Self::Nowhere => "Nowhere",
            }
        }
    }

    #[derive(Debug)]
    struct Next;

    impl Event for Next {
        fn event_type(&self) -> &str {
            "NEXT"
        }
    }

    fn linear() -> MachineBuilder<Step, u32, Next> {
        MachineBuilder::new("linear")
            .initial(Step::Start)
            .context(0)
            .state(Step::Start, StateNode::new().on("NEXT", Step::Middle))
            .state(
                Step::Middle,
                StateNode::new().on("NEXT", Step::End).on("BACK", Step::Start),
            )
            .terminal(Step::End)
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = MachineBuilder::<Step, u32, Next>::new("empty").build();
        assert!(matches!(result, Err(BuildError::MissingInitialState)));

        let result = MachineBuilder::<Step, u32, Next>::new("empty")
            .initial(Step::Start)
            .build();
        assert!(matches!(result, Err(BuildError::MissingInitialContext)));
    }

    #[test]
    fn builder_requires_states() {
        let result = MachineBuilder::<Step, u32, Next>::new("empty")
            .initial(Step::Start)
            .context(0)
            .build();

        assert!(matches!(result, Err(BuildError::NoStates)));
    }

    #[test]
    fn well_formed_machine_builds() {
        let machine = linear().build().unwrap();

        assert_eq!(machine.name(), "linear");
        assert_eq!(machine.initial(), &Step::Start);
        assert_eq!(*machine.initial_context(), 0);
        assert_eq!(machine.states().count(), 3);
        assert!(machine.contains(&Step::End));
        assert!(!machine.contains(&Step::Nowhere));
    }

    #[test]
    fn rejects_unknown_initial_state() {
        let result = linear().initial(Step::Nowhere).build();

        match result {
            Err(BuildError::Invalid(errors)) => {
                assert_eq!(
                    errors,
                    vec![DefinitionError::UnknownInitialState {
                        state: "Nowhere".into()
                    }]
                );
            }
            other => panic!("expected invalid definition, got {:?}", other.err()),
        }
    }

    #[test]
    fn rejects_dangling_target() {
        let result = MachineBuilder::<Step, u32, Next>::new("dangling")
            .initial(Step::Start)
            .context(0)
            .state(Step::Start, StateNode::new().on("NEXT", Step::Nowhere))
            .build();

        match result {
            Err(BuildError::Invalid(errors)) => {
                assert_eq!(
                    errors,
                    vec![DefinitionError::DanglingTarget {
                        from: "Start".into(),
                        event: "NEXT".into(),
                        target: "Nowhere".into(),
                    }]
                );
            }
            other => panic!("expected invalid definition, got {:?}", other.err()),
        }
    }

    #[test]
    fn accumulates_all_problems() {
        let result = MachineBuilder::<Step, u32, Next>::new("broken")
            .initial(Step::Nowhere)
            .context(0)
            .state(Step::Start, StateNode::new().on("NEXT", Step::Nowhere))
            .state(Step::Start, StateNode::new())
            .state(Step::Start, StateNode::new())
            .build();

        match result {
            Err(BuildError::Invalid(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, DefinitionError::UnknownInitialState { .. })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, DefinitionError::DuplicateState { .. })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, DefinitionError::DanglingTarget { .. })));
            }
            other => panic!("expected invalid definition, got {:?}", other.err()),
        }
    }

    #[test]
    fn can_and_next_events_follow_table() {
        let machine = linear().build().unwrap();

        assert!(machine.can(&Step::Start, "NEXT"));
        assert!(!machine.can(&Step::Start, "BACK"));
        assert!(!machine.can(&Step::End, "NEXT"));
        assert!(!machine.can(&Step::Nowhere, "NEXT"));
        assert_eq!(machine.next_events(&Step::Middle), vec!["NEXT", "BACK"]);
        assert!(machine.next_events(&Step::End).is_empty());
    }

    #[test]
    fn initial_state_uses_initial_context() {
        let machine = linear().context(42).build().unwrap();
        let state = machine.initial_state();

        assert_eq!(state.value(), &Step::Start);
        assert_eq!(*state.context(), 42);
    }
}
