//! Checkpoint and resume for running flows.
//!
//! A checkpoint captures the runtime state and history of one flow so it
//! can be restored after a reload. Definitions are code, not data: they are
//! never serialized, and a checkpoint can only be resumed against a
//! definition with the same name that declares the checkpointed state.

use crate::core::{State, StateHistory};
use crate::definition::MachineDefinition;
use crate::interpreter::MachineState;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a running flow.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "C: Serialize", deserialize = "C: DeserializeOwned"))]
pub struct Checkpoint<S: State, C> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// Name of the machine definition the flow runs on
    pub machine: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Current runtime state
    pub state: MachineState<S, C>,

    /// Retained transition history
    pub history: StateHistory<S>,

    /// Transitions taken since the flow started
    pub transitions: u64,
}

impl<S: State, C> Checkpoint<S, C> {
    pub fn new(
        machine: impl Into<String>,
        state: MachineState<S, C>,
        history: StateHistory<S>,
        transitions: u64,
    ) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            machine: machine.into(),
            timestamp: Utc::now(),
            state,
            history,
            transitions,
        }
    }

    /// Check that this checkpoint can be resumed against `definition`.
    pub fn validate_for<E>(
        &self,
        definition: &MachineDefinition<S, C, E>,
    ) -> Result<(), CheckpointError> {
        self.check_version()?;

        if self.machine != definition.name() {
            return Err(CheckpointError::MachineMismatch {
                expected: definition.name().to_string(),
                found: self.machine.clone(),
            });
        }

        if !definition.contains(self.state.value()) {
            return Err(CheckpointError::UnknownState(
                self.state.value().name().to_string(),
            ));
        }

        Ok(())
    }

    /// Only the current format version is accepted, older or newer.
    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

impl<S: State, C: Serialize + DeserializeOwned> Checkpoint<S, C> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }
}
