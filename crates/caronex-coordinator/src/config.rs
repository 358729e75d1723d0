//! Coordinator configuration.
//!
//! The configuration is an explicit value handed to
//! [`Coordinator::from_config`](crate::Coordinator::from_config); nothing in
//! this crate reads global state.

use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use caronex_core::{AgentDescriptor, AgentStatus, CoreError};

use crate::resolver::DEFAULT_EXPECTED_COMPLETION_MINUTES;

/// Largest accepted `expected_completion_minutes` (ten years).
pub const MAX_EXPECTED_COMPLETION_MINUTES: u64 = 60 * 24 * 365 * 10;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One agent entry in the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Unique agent name.
    pub name: String,

    /// Declared capability tags.
    #[serde(default)]
    pub capabilities: Vec<String>,

    /// Coordination style tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization_mode: Option<String>,

    /// Initial status.
    #[serde(default)]
    pub status: AgentStatus,
}

impl From<AgentConfig> for AgentDescriptor {
    fn from(config: AgentConfig) -> Self {
        let agent = AgentDescriptor::new(config.name)
            .with_capabilities(config.capabilities)
            .with_status(config.status);
        match config.specialization_mode {
            Some(mode) => agent.with_specialization(mode),
            None => agent,
        }
    }
}

/// Coordinator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Agents registered at startup, in order.
    pub agents: Vec<AgentConfig>,

    /// Agent used when neither the preferred agent nor keyword matching applies.
    pub default_agent: Option<String>,

    /// Overrides the coordinator-level capabilities reported by introspection.
    pub coordinator_capabilities: Option<Vec<String>>,

    /// Placeholder delegation estimate (minutes).
    pub expected_completion_minutes: u64,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            agents: Vec::new(),
            default_agent: None,
            coordinator_capabilities: None,
            expected_completion_minutes: DEFAULT_EXPECTED_COMPLETION_MINUTES as u64,
        }
    }
}

impl CoordinatorConfig {
    /// Parse a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// The configured delegation estimate.
    ///
    /// Values above [`MAX_EXPECTED_COMPLETION_MINUTES`] are rejected with
    /// `InvalidInput` instead of overflowing.
    pub fn expected_completion(&self) -> Result<Duration, CoreError> {
        let minutes = self.expected_completion_minutes;
        let out_of_range = || {
            CoreError::InvalidInput(format!(
                "expected_completion_minutes out of range: {} (max {})",
                minutes, MAX_EXPECTED_COMPLETION_MINUTES
            ))
        };

        if minutes > MAX_EXPECTED_COMPLETION_MINUTES {
            return Err(out_of_range());
        }
        let minutes = i64::try_from(minutes).map_err(|_| out_of_range())?;
        Duration::try_minutes(minutes).ok_or_else(out_of_range)
    }

    /// Agent descriptors in configuration order.
    pub fn descriptors(&self) -> impl Iterator<Item = AgentDescriptor> + '_ {
        self.agents.iter().cloned().map(AgentDescriptor::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "agents": [
            {"name": "caronex", "capabilities": ["planning", "coordination"], "specialization_mode": "cooperative"},
            {"name": "coder", "capabilities": ["code_generation"]},
            {"name": "summarizer", "capabilities": ["summarization"], "status": "OFFLINE"}
        ],
        "default_agent": "caronex"
    }"#;

    #[test]
    fn test_parse_sample() {
        let config = CoordinatorConfig::from_json_str(SAMPLE).unwrap();

        assert_eq!(config.agents.len(), 3);
        assert_eq!(config.default_agent.as_deref(), Some("caronex"));
        assert_eq!(config.expected_completion_minutes, 60);
        assert!(config.coordinator_capabilities.is_none());

        let descriptors: Vec<_> = config.descriptors().collect();
        assert_eq!(descriptors[0].specialization_mode.as_deref(), Some("cooperative"));
        assert_eq!(descriptors[2].status, AgentStatus::Offline);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = CoordinatorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CoordinatorConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let err = CoordinatorConfig::from_json_str("{\"agents\": 5}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_expected_completion() {
        let config = CoordinatorConfig::default();
        assert_eq!(config.expected_completion().unwrap(), Duration::minutes(60));

        let config = CoordinatorConfig {
            expected_completion_minutes: MAX_EXPECTED_COMPLETION_MINUTES,
            ..CoordinatorConfig::default()
        };
        assert!(config.expected_completion().is_ok());
    }

    #[test]
    fn test_huge_expected_completion_rejected() {
        // Each of these overflowed or wrapped negative when cast to minutes.
        for minutes in [1_000_000_000_000, 1 << 62, u64::MAX] {
            let config = CoordinatorConfig {
                expected_completion_minutes: minutes,
                ..CoordinatorConfig::default()
            };
            let err = config.expected_completion().unwrap_err();
            assert!(matches!(err, CoreError::InvalidInput(_)), "{minutes}");
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = CoordinatorConfig::load(file.path()).unwrap();
        assert_eq!(config.agents[1].name, "coder");
    }

    #[test]
    fn test_load_missing_file() {
        let err = CoordinatorConfig::load("/nonexistent/caronex.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
