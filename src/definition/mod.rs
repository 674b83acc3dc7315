//! Machine definitions: construction and validation.
//!
//! A definition is static data. It is validated once, when built, so a
//! malformed machine is rejected up front instead of getting stuck at run
//! time.

pub mod error;
pub mod machine;
pub mod macros;
pub mod node;
pub mod transition;

pub use error::{BuildError, DefinitionError};
pub use machine::{MachineBuilder, MachineDefinition};
pub use node::{StateNode, TransitionConfig, TransitionRecord};
pub use transition::TransitionBuilder;
