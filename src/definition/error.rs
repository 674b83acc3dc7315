//! Errors raised while constructing machine definitions.

use thiserror::Error;

/// Structural problems found when validating a complete definition.
///
/// All of them are collected in one pass, so a malformed definition reports
/// every problem at once.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DefinitionError {
    #[error("Initial state '{state}' is not declared in the machine")]
    UnknownInitialState { state: String },

    #[error("State '{state}' is declared more than once")]
    DuplicateState { state: String },

    #[error("Transition '{event}' from '{from}' targets undeclared state '{target}'")]
    DanglingTarget {
        from: String,
        event: String,
        target: String,
    },
}

/// Errors that can occur when building machines and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Initial context not specified. Call .context(value) before .build()")]
    MissingInitialContext,

    #[error("No states declared. Add at least one state")]
    NoStates,

    #[error("Transition target not specified. Call .to(state)")]
    MissingTarget,

    #[error("Invalid machine definition: {}", join(.0))]
    Invalid(Vec<DefinitionError>),
}

fn join(errors: &[DefinitionError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
