//! Introspection snapshot types.

use crate::AgentDescriptor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An agent paired with its resolved capabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentCapabilities {
    pub agent: AgentDescriptor,
    pub capabilities: Vec<String>,
}

/// Point-in-time view of the coordinator for external consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    /// Agents that are not Offline, in registration order.
    pub available_agents: Vec<AgentCapabilities>,

    /// Sorted, deduplicated union of coordinator and agent capabilities.
    pub system_capabilities: Vec<String>,

    /// Content digest of registry membership and declared capabilities.
    pub configuration_fingerprint: String,

    /// When the snapshot was generated.
    pub generated_at: DateTime<Utc>,
}

impl SystemSnapshot {
    /// Names of the available agents.
    pub fn agent_names(&self) -> Vec<&str> {
        self.available_agents
            .iter()
            .map(|a| a.agent.name.as_str())
            .collect()
    }

    /// Check whether any part of the system offers a capability.
    pub fn has_capability(&self, capability: &str) -> bool {
        self.system_capabilities.iter().any(|c| c == capability)
    }
}
