//! Request lifecycle with a bounded number of retries.
//!
//! `idle -> loading -> {success | error}`, `error -> loading` while retries
//! remain, and `RESET` back to a clean `idle`.

use crate::core::{Action, Event};
use crate::definition::{BuildError, MachineBuilder, MachineDefinition, StateNode, TransitionBuilder};
use crate::state_enum;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

state_enum! {
    pub enum AsyncState {
        Idle = "idle",
        Loading = "loading",
        Success = "success",
        Error = "error",
    }
    error: [Error]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AsyncContext<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub retries: u32,
    pub max_retries: u32,
}

impl<T> AsyncContext<T> {
    pub fn new(max_retries: u32) -> Self {
        Self {
            data: None,
            error: None,
            retries: 0,
            max_retries,
        }
    }

    pub fn retries_left(&self) -> u32 {
        self.max_retries.saturating_sub(self.retries)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AsyncEvent<T> {
    Fetch,
    Resolve(T),
    Reject(String),
    Retry,
    Reset,
}

impl<T: Debug + Send + Sync> Event for AsyncEvent<T> {
    fn event_type(&self) -> &str {
        match self {
            Self::Fetch => "FETCH",
            Self::Resolve(_) => "SUCCESS",
            Self::Reject(_) => "ERROR",
            Self::Retry => "RETRY",
            Self::Reset => "RESET",
        }
    }
}

pub type AsyncMachine<T> = MachineDefinition<AsyncState, AsyncContext<T>, AsyncEvent<T>>;

/// Async-operation machine allowing `max_retries` retries after an error.
pub fn async_operation_machine<T>(max_retries: u32) -> Result<AsyncMachine<T>, BuildError>
where
    T: Clone + Debug + Send + Sync + 'static,
{
    use AsyncState::*;

    let reset = || Action::new(|ctx: AsyncContext<T>| AsyncContext::new(ctx.max_retries));

    let idle = StateNode::new().on("FETCH", Loading);

    let loading = StateNode::new()
        .entry(Action::new(|ctx: AsyncContext<T>| AsyncContext {
            error: None,
            ..ctx
        }))
        .on_transition(
            "SUCCESS",
            TransitionBuilder::new().to(Success).assign_with_event(
                |mut ctx: AsyncContext<T>, event: &AsyncEvent<T>| {
                    if let AsyncEvent::Resolve(data) = event {
                        ctx.data = Some(data.clone());
                    }
                    ctx
                },
            ),
        )?
        .on_transition(
            "ERROR",
            TransitionBuilder::new().to(Error).assign_with_event(
                |mut ctx: AsyncContext<T>, event: &AsyncEvent<T>| {
                    if let AsyncEvent::Reject(message) = event {
                        ctx.error = Some(message.clone());
                    }
                    ctx
                },
            ),
        )?;

    let success = StateNode::new()
        .on("FETCH", Loading)
        .on_transition("RESET", TransitionBuilder::new().to(Idle).action(reset()))?;

    let error = StateNode::new()
        .on_transition(
            "RETRY",
            TransitionBuilder::new()
                .to(Loading)
                .when(|ctx: &AsyncContext<T>| ctx.retries < ctx.max_retries)
                .assign(|ctx: AsyncContext<T>| AsyncContext {
                    retries: ctx.retries + 1,
                    ..ctx
                }),
        )?
        .on_transition("RESET", TransitionBuilder::new().to(Idle).action(reset()))?;

    MachineBuilder::new("async-operation")
        .initial(Idle)
        .context(AsyncContext::new(max_retries))
        .state(Idle, idle)
        .state(Loading, loading)
        .state(Success, success)
        .state(Error, error)
        .build()
}
