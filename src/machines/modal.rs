//! Four-phase modal sequencer driven by animation callbacks.
//!
//! `closed -> opening -> open -> closing -> closed`. The host sends
//! `ANIMATION_END` when the CSS transition of the current phase finishes.

use crate::core::{Action, Event};
use crate::definition::{BuildError, MachineBuilder, MachineDefinition, StateNode, TransitionBuilder};
use crate::state_enum;
use serde::{Deserialize, Serialize};

state_enum! {
    pub enum ModalState {
        Closed = "closed",
        Opening = "opening",
        Open = "open",
        Closing = "closing",
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModalContext {
    pub content: Option<String>,
    pub times_opened: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModalEvent {
    Open { content: String },
    Close,
    AnimationEnd,
}

impl Event for ModalEvent {
    fn event_type(&self) -> &str {
        match self {
            Self::Open { .. } => "OPEN",
            Self::Close => "CLOSE",
            Self::AnimationEnd => "ANIMATION_END",
        }
    }
}

pub type ModalMachine = MachineDefinition<ModalState, ModalContext, ModalEvent>;

fn store_content(mut ctx: ModalContext, event: &ModalEvent) -> ModalContext {
    if let ModalEvent::Open { content } = event {
        ctx.content = Some(content.clone());
    }
    ctx
}

pub fn modal_machine() -> Result<ModalMachine, BuildError> {
    use ModalState::*;

    let open_with_content = || TransitionBuilder::new().to(Opening).assign_with_event(store_content);

    let closed = StateNode::new()
        .entry(Action::new(|ctx: ModalContext| ModalContext {
            content: None,
            ..ctx
        }))
        .on_transition("OPEN", open_with_content())?;

    let opening = StateNode::new()
        .on("ANIMATION_END", Open)
        .on("CLOSE", Closing);

    let open = StateNode::new()
        .entry(Action::new(|ctx: ModalContext| ModalContext {
            times_opened: ctx.times_opened + 1,
            ..ctx
        }))
        .on("CLOSE", Closing);

    let closing = StateNode::new()
        .on("ANIMATION_END", Closed)
        .on_transition("OPEN", open_with_content())?;

    MachineBuilder::new("modal")
        .initial(Closed)
        .context(ModalContext::default())
        .state(Closed, closed)
        .state(Opening, opening)
        .state(Open, open)
        .state(Closing, closing)
        .build()
}
