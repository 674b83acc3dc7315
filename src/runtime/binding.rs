//! Stateful runtime binding for one flow instance.

use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::config::{ConfigError, RuntimeConfig};
use crate::core::{Event, State, StateHistory, StateTransition};
use crate::definition::MachineDefinition;
use crate::interpreter::{apply, decide, Decision, MachineState};
use crate::runtime::observer::{Observer, TracingObserver};
use chrono::Utc;
use std::sync::Arc;
use stillwater::effect::Effect;

/// Owns the current `(state, context)` of one flow and applies events to it.
///
/// Events are applied in the order `send` is called, each to completion.
/// The runtime never performs I/O itself; asynchronous work belongs to the
/// host, which reports the outcome as an ordinary event.
pub struct Runtime<S: State, C, E: Event> {
    definition: Arc<MachineDefinition<S, C, E>>,
    state: MachineState<S, C>,
    history: StateHistory<S>,
    transitions: u64,
    config: RuntimeConfig,
    observer: Box<dyn Observer<S, E>>,
}

impl<S, C, E> Runtime<S, C, E>
where
    S: State + 'static,
    C: Clone,
    E: Event + 'static,
{
    /// Start a flow in the definition's initial state.
    pub fn new(definition: Arc<MachineDefinition<S, C, E>>) -> Self {
        let state = definition.initial_state();
        Self {
            definition,
            state,
            history: StateHistory::new(),
            transitions: 0,
            config: RuntimeConfig::default(),
            observer: Box::new(TracingObserver),
        }
    }

    /// Restore a flow from a checkpoint taken on the same definition.
    pub fn resume(
        definition: Arc<MachineDefinition<S, C, E>>,
        checkpoint: Checkpoint<S, C>,
    ) -> Result<Self, CheckpointError> {
        checkpoint.validate_for(&*definition)?;

        Ok(Self {
            definition,
            state: checkpoint.state,
            history: checkpoint.history,
            transitions: checkpoint.transitions,
            config: RuntimeConfig::default(),
            observer: Box::new(TracingObserver),
        })
    }

    /// Install `config`, trimming any restored history to its limit.
    pub fn with_config(mut self, config: RuntimeConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        if let Some(limit) = config.history_limit {
            self.history = self.history.newest(limit);
        }
        self.config = config;
        Ok(self)
    }

    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: Observer<S, E> + 'static,
    {
        self.observer = Box::new(observer);
        self
    }

    /// Apply one event and replace the owned state with the result.
    ///
    /// Unhandled events and blocked guards leave the state as it was and
    /// are reported to the observer only.
    pub fn send(&mut self, event: E) {
        let machine = self.definition.name();

        let resolved = match decide(&*self.definition, &self.state, &event) {
            Decision::Take(resolved) => resolved,
            Decision::Unhandled => {
                self.observer
                    .on_unhandled(machine, self.state.value(), &event);
                return;
            }
            Decision::Blocked { target } => {
                self.observer
                    .on_guard_blocked(machine, self.state.value(), target, &event);
                return;
            }
        };

        // The current state stays in place until every action has returned.
        let next = apply(&*self.definition, &resolved, self.state.clone(), &event);
        let from = self.state.value().clone();

        self.observer
            .on_transition(machine, &from, next.value(), &event);

        if self.config.record_history {
            let record = StateTransition {
                from,
                to: next.value().clone(),
                event: event.event_type().to_string(),
                timestamp: Utc::now(),
                sequence: self.transitions,
            };
            self.history = match self.config.history_limit {
                Some(limit) => self.history.record_bounded(record, limit),
                None => self.history.record(record),
            };
        }

        self.transitions += 1;
        self.state = next;
    }

    /// Run a host effect and send whichever event it resolves to.
    ///
    /// Both the success and the failure output of the effect are events, so
    /// the machine definition decides what a failure means.
    pub async fn dispatch<Eff, Env>(&mut self, effect: Eff, env: &Env)
    where
        Eff: Effect<Output = E, Error = E, Env = Env>,
        Env: Clone + Send + Sync + 'static,
    {
        let event = match effect.run(env).await {
            Ok(event) => event,
            Err(event) => event,
        };
        self.send(event);
    }

    /// Snapshot the flow for later [`Runtime::resume`].
    pub fn checkpoint(&self) -> Checkpoint<S, C> {
        Checkpoint::new(
            self.definition.name(),
            self.state.clone(),
            self.history.clone(),
            self.transitions,
        )
    }
}

impl<S: State, C, E: Event> Runtime<S, C, E> {
    pub fn state(&self) -> &MachineState<S, C> {
        &self.state
    }

    pub fn value(&self) -> &S {
        self.state.value()
    }

    pub fn context(&self) -> &C {
        self.state.context()
    }

    pub fn matches(&self, candidate: &S) -> bool {
        self.state.matches(candidate)
    }

    /// Whether the current state has a transition for `event_type`.
    ///
    /// Guards are not evaluated and no action runs.
    pub fn can(&self, event_type: &str) -> bool {
        self.definition.can(self.state.value(), event_type)
    }

    /// Event types handled by the current state, in table order.
    pub fn next_events(&self) -> Vec<&str> {
        self.definition.next_events(self.state.value())
    }

    pub fn is_final(&self) -> bool {
        self.state.value().is_final()
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Number of transitions taken, including any not kept in history.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn definition(&self) -> &Arc<MachineDefinition<S, C, E>> {
        &self.definition
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{MachineBuilder, StateNode, TransitionBuilder};
    use crate::runtime::observer::{Diagnostic, RecordingObserver};
    use serde::{Deserialize, Serialize};
    use stillwater::prelude::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Job {
        Idle,
        Running,
        Done,
        Failed,
    }

    impl State for Job {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Running => "Running",
                Self::Done => "Done",
                Self::Failed => "Failed",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Done)
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum JobEvent {
        Start,
        Finish(u32),
        Fail,
        Reset,
    }

    impl Event for JobEvent {
        fn event_type(&self) -> &str {
            match self {
                Self::Start => "START",
                Self::Finish(_) => "FINISH",
                Self::Fail => "FAIL",
                Self::Reset => "RESET",
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
    struct Ctx {
        result: Option<u32>,
        enabled: bool,
    }

    fn definition() -> Arc<MachineDefinition<Job, Ctx, JobEvent>> {
        let machine = MachineBuilder::new("job")
            .initial(Job::Idle)
            .context(Ctx::default())
            .state(
                Job::Idle,
                StateNode::new()
                    .on_transition(
                        "START",
                        TransitionBuilder::new()
                            .to(Job::Running)
                            .when(|ctx: &Ctx| ctx.enabled),
                    )
                    .unwrap(),
            )
            .state(
                Job::Running,
                StateNode::new()
                    .on_transition(
                        "FINISH",
                        TransitionBuilder::new().to(Job::Done).assign_with_event(
                            |mut ctx: Ctx, event: &JobEvent| {
                                if let JobEvent::Finish(value) = event {
                                    ctx.result = Some(*value);
                                }
                                ctx
                            },
                        ),
                    )
                    .unwrap()
                    .on("FAIL", Job::Failed),
            )
            .terminal(Job::Done)
            .state(Job::Failed, StateNode::new().on("RESET", Job::Idle))
            .build()
            .unwrap();
        Arc::new(machine)
    }

    fn enabled_runtime() -> Runtime<Job, Ctx, JobEvent> {
        let mut runtime = Runtime::new(definition());
        runtime.state = MachineState::new(
            Job::Idle,
            Ctx {
                result: None,
                enabled: true,
            },
        );
        runtime
    }

    #[test]
    fn starts_in_initial_state() {
        let runtime = Runtime::new(definition());

        assert!(runtime.matches(&Job::Idle));
        assert_eq!(runtime.context(), &Ctx::default());
        assert!(runtime.history().is_empty());
        assert_eq!(runtime.transitions(), 0);
    }

    #[test]
    fn send_applies_transitions_in_order() {
        let mut runtime = enabled_runtime();

        runtime.send(JobEvent::Start);
        runtime.send(JobEvent::Finish(7));

        assert!(runtime.matches(&Job::Done));
        assert!(runtime.is_final());
        assert_eq!(runtime.context().result, Some(7));
        assert_eq!(
            runtime.history().get_path(),
            vec![&Job::Idle, &Job::Running, &Job::Done]
        );
        assert_eq!(runtime.history().transitions()[1].event, "FINISH");
        assert_eq!(runtime.history().transitions()[1].sequence, 1);
    }

    #[test]
    fn diagnostics_reach_observer() {
        let recorder = RecordingObserver::new();
        let mut runtime = Runtime::new(definition()).with_observer(recorder.clone());

        runtime.send(JobEvent::Finish(1));
        runtime.send(JobEvent::Start);

        assert!(runtime.matches(&Job::Idle));
        assert_eq!(
            recorder.diagnostics(),
            vec![
                Diagnostic::Unhandled {
                    machine: "job".into(),
                    state: "Idle".into(),
                    event: "FINISH".into(),
                },
                Diagnostic::GuardBlocked {
                    machine: "job".into(),
                    state: "Idle".into(),
                    target: "Running".into(),
                    event: "START".into(),
                },
            ]
        );
        assert!(runtime.history().is_empty());
    }

    #[test]
    fn queries_do_not_mutate() {
        let runtime = enabled_runtime();
        let before = runtime.state().clone();

        for _ in 0..3 {
            assert!(runtime.matches(&Job::Idle));
            assert!(runtime.can("START"));
            assert!(!runtime.can("RESET"));
            assert_eq!(runtime.next_events(), vec!["START"]);
        }

        assert_eq!(runtime.state(), &before);
    }

    #[test]
    fn can_ignores_guards() {
        let runtime = Runtime::new(definition());
        assert!(!runtime.context().enabled);
        assert!(runtime.can("START"));
    }

    #[test]
    fn history_respects_config() {
        let mut runtime = enabled_runtime()
            .with_config(RuntimeConfig::new().history_limit(1))
            .unwrap();
        runtime.send(JobEvent::Start);
        runtime.send(JobEvent::Fail);
        runtime.send(JobEvent::Reset);

        assert_eq!(runtime.history().len(), 1);
        assert_eq!(runtime.history().transitions()[0].to, Job::Idle);
        assert_eq!(runtime.transitions(), 3);

        let mut quiet = enabled_runtime()
            .with_config(RuntimeConfig::new().record_history(false))
            .unwrap();
        quiet.send(JobEvent::Start);
        assert!(quiet.history().is_empty());
        assert_eq!(quiet.transitions(), 1);
    }

    #[test]
    fn with_config_rejects_zero_limit() {
        let result = enabled_runtime().with_config(RuntimeConfig::new().history_limit(0));
        assert!(matches!(result, Err(ConfigError::ZeroHistoryLimit)));

        let silent = RuntimeConfig::new().record_history(false).history_limit(0);
        assert!(enabled_runtime().with_config(silent).is_ok());
    }

    #[test]
    fn with_config_trims_resumed_history() {
        let mut runtime = enabled_runtime();
        for _ in 0..2 {
            runtime.send(JobEvent::Start);
            runtime.send(JobEvent::Fail);
            runtime.send(JobEvent::Reset);
        }
        assert_eq!(runtime.history().len(), 6);

        let resumed = Runtime::resume(definition(), runtime.checkpoint())
            .unwrap()
            .with_config(RuntimeConfig::new().history_limit(2))
            .unwrap();

        assert_eq!(resumed.history().len(), 2);
        assert_eq!(resumed.history().transitions()[0].sequence, 4);
        assert_eq!(resumed.history().transitions()[1].to, Job::Idle);
        assert_eq!(resumed.transitions(), 6);
    }

    #[test]
    fn unhandled_events_leave_state_alone() {
        let mut runtime = enabled_runtime();
        let before = runtime.state().clone();

        runtime.send(JobEvent::Reset);
        runtime.send(JobEvent::Finish(9));

        assert_eq!(runtime.state(), &before);
        assert_eq!(runtime.transitions(), 0);
    }

    #[test]
    fn checkpoint_and_resume() {
        let mut runtime = enabled_runtime();
        runtime.send(JobEvent::Start);

        let json = runtime.checkpoint().to_json().unwrap();
        let checkpoint = Checkpoint::<Job, Ctx>::from_json(&json).unwrap();
        let mut resumed = Runtime::resume(definition(), checkpoint).unwrap();

        assert!(resumed.matches(&Job::Running));
        assert_eq!(resumed.transitions(), 1);
        resumed.send(JobEvent::Finish(3));
        assert!(resumed.matches(&Job::Done));
        assert_eq!(resumed.history().len(), 2);
        assert_eq!(resumed.history().transitions()[1].sequence, 1);
    }

    #[tokio::test]
    async fn dispatch_sends_effect_success() {
        let mut runtime = enabled_runtime();
        runtime.send(JobEvent::Start);

        runtime.dispatch(pure(JobEvent::Finish(42)), &()).await;

        assert!(runtime.matches(&Job::Done));
        assert_eq!(runtime.context().result, Some(42));
    }

    #[tokio::test]
    async fn dispatch_sends_effect_failure() {
        let mut runtime = enabled_runtime();
        runtime.send(JobEvent::Start);

        runtime.dispatch(fail(JobEvent::Fail), &()).await;

        assert!(runtime.matches(&Job::Failed));
    }
}
