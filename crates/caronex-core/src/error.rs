//! Core domain errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core domain errors for Caronex.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Task description was empty or whitespace only.
    #[error("Task description must not be empty")]
    EmptyTaskDescription,

    /// An agent with this name is already registered.
    #[error("Agent already registered: {0}")]
    DuplicateAgentName(String),

    /// Agent not found.
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// Step not found in a plan.
    #[error("Step not found: {0}")]
    StepNotFound(String),

    /// No registered agent can take the task.
    #[error("No agent available for task: {description}")]
    NoAgentAvailable { description: String },

    /// Preferred agent hint does not name an eligible agent.
    #[error("Preferred agent is not available: {0}")]
    InvalidPreferredAgent(String),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid state transition.
    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },
}

/// Error kinds, stable across message wording changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    EmptyTaskDescription,
    DuplicateAgentName,
    NotFound,
    NoAgentAvailable,
    InvalidPreferredAgent,
    InvalidInput,
    InvalidStateTransition,
}

impl CoreError {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyTaskDescription => ErrorKind::EmptyTaskDescription,
            Self::DuplicateAgentName(_) => ErrorKind::DuplicateAgentName,
            Self::AgentNotFound(_) | Self::StepNotFound(_) => ErrorKind::NotFound,
            Self::NoAgentAvailable { .. } => ErrorKind::NoAgentAvailable,
            Self::InvalidPreferredAgent(_) => ErrorKind::InvalidPreferredAgent,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::InvalidStateTransition { .. } => ErrorKind::InvalidStateTransition,
        }
    }
}

impl ErrorKind {
    /// Machine-readable code, e.g. `NO_AGENT_AVAILABLE`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTaskDescription => "EMPTY_TASK_DESCRIPTION",
            Self::DuplicateAgentName => "DUPLICATE_AGENT_NAME",
            Self::NotFound => "NOT_FOUND",
            Self::NoAgentAvailable => "NO_AGENT_AVAILABLE",
            Self::InvalidPreferredAgent => "INVALID_PREFERRED_AGENT",
            Self::InvalidInput => "INVALID_INPUT",
            Self::InvalidStateTransition => "INVALID_STATE_TRANSITION",
        }
    }
}
