//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint was taken from a different machine definition
    #[error("Checkpoint belongs to machine '{found}', expected '{expected}'")]
    MachineMismatch { expected: String, found: String },

    /// Checkpointed state is not declared by the definition
    #[error("Checkpoint state '{0}' is not declared in the machine")]
    UnknownState(String),
}
