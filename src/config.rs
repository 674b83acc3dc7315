//! Runtime configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse runtime configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("History limit must be greater than zero when history is recorded")]
    ZeroHistoryLimit,
}

/// Settings for a [`Runtime`](crate::runtime::Runtime).
///
/// Missing fields take their defaults when loaded from JSON.
///
/// # Example
///
/// ```
/// use flowstate::config::RuntimeConfig;
///
/// let config = RuntimeConfig::from_json(r#"{ "history_limit": 50 }"#).unwrap();
/// assert!(config.record_history);
/// assert_eq!(config.history_limit, Some(50));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Record taken transitions in the runtime's history
    pub record_history: bool,

    /// Keep only the newest `n` transitions; `None` keeps all
    pub history_limit: Option<usize>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            record_history: true,
            history_limit: None,
        }
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.record_history && self.history_limit == Some(0) {
            return Err(ConfigError::ZeroHistoryLimit);
        }
        Ok(())
    }
}
