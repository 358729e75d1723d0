//! Agent descriptor types.

use crate::AgentStatus;
use serde::{Deserialize, Serialize};

/// A registered capability provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    /// Unique agent name, stable for the process lifetime.
    pub name: String,

    /// Declared capability tags (e.g. "code_generation", "planning").
    #[serde(default)]
    pub capabilities: Vec<String>,

    /// Coordination style tag (e.g. "cooperative"). Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization_mode: Option<String>,

    /// Current availability.
    #[serde(default)]
    pub status: AgentStatus,
}

impl AgentDescriptor {
    /// Create a new AgentDescriptor with no capabilities.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capabilities: Vec::new(),
            specialization_mode: None,
            status: AgentStatus::Available,
        }
    }

    /// Builder method to add a capability. Duplicates are ignored.
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        let capability = capability.into();
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    /// Builder method to add several capabilities.
    pub fn with_capabilities<I, S>(self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        capabilities
            .into_iter()
            .fold(self, |agent, cap| agent.with_capability(cap))
    }

    /// Builder method to set the specialization mode.
    pub fn with_specialization(mut self, mode: impl Into<String>) -> Self {
        self.specialization_mode = Some(mode.into());
        self
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: AgentStatus) -> Self {
        self.status = status;
        self
    }

    /// Check if this agent declares a capability.
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }

    /// Check if this agent may receive delegations.
    pub fn is_available(&self) -> bool {
        !self.status.is_offline()
    }
}
