//! Introspection reporter - aggregates registry state into a snapshot.

use std::collections::BTreeSet;

use chrono::Utc;
use sha2::{Digest, Sha256};

use caronex_core::{AgentCapabilities, SystemSnapshot};

use crate::registry::{CapabilityRegistry, RegistryView};

/// Capabilities the coordinator itself provides.
pub const COORDINATOR_CAPABILITIES: [&str; 3] =
    ["task_planning", "agent_delegation", "system_introspection"];

/// Builds [`SystemSnapshot`]s. Snapshots are recomputed on every call.
#[derive(Debug, Clone)]
pub struct IntrospectionReporter {
    coordinator_capabilities: Vec<String>,
}

impl Default for IntrospectionReporter {
    fn default() -> Self {
        Self::new(COORDINATOR_CAPABILITIES.iter().map(|c| c.to_string()).collect())
    }
}

impl IntrospectionReporter {
    /// Create a reporter advertising `coordinator_capabilities`.
    pub fn new(coordinator_capabilities: Vec<String>) -> Self {
        Self {
            coordinator_capabilities,
        }
    }

    /// Take a snapshot of `registry`. Never fails.
    pub fn snapshot(&self, registry: &CapabilityRegistry) -> SystemSnapshot {
        let view = registry.view();

        let available_agents: Vec<AgentCapabilities> = view
            .iter()
            .filter(|a| a.is_available())
            .map(|a| AgentCapabilities {
                agent: a.clone(),
                capabilities: a.capabilities.clone(),
            })
            .collect();

        let system_capabilities: Vec<String> = self
            .coordinator_capabilities
            .iter()
            .chain(available_agents.iter().flat_map(|a| a.capabilities.iter()))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        SystemSnapshot {
            available_agents,
            system_capabilities,
            configuration_fingerprint: self.fingerprint(&view),
            generated_at: Utc::now(),
        }
    }

    /// Content digest of registry membership and declared capabilities.
    ///
    /// Independent of registration order, agent status and wall-clock time.
    /// Every list and string is length-prefixed before hashing, so no choice
    /// of names or tags can make two distinct configurations encode alike.
    pub fn fingerprint(&self, view: &RegistryView) -> String {
        let mut entries: Vec<(&str, BTreeSet<&str>)> = view
            .iter()
            .map(|a| {
                let caps = a.capabilities.iter().map(String::as_str).collect();
                (a.name.as_str(), caps)
            })
            .collect();
        entries.sort();

        let coordinator: BTreeSet<&str> = self
            .coordinator_capabilities
            .iter()
            .map(String::as_str)
            .collect();

        let mut hasher = Sha256::new();
        hash_strs(&mut hasher, &coordinator);
        hash_len(&mut hasher, entries.len());
        for (name, caps) in &entries {
            hash_str(&mut hasher, name);
            hash_strs(&mut hasher, caps);
        }
        let digest = hex::encode(hasher.finalize());

        format!("cfg_{}", &digest[..16])
    }
}

fn hash_len(hasher: &mut Sha256, len: usize) {
    hasher.update((len as u64).to_le_bytes());
}

fn hash_str(hasher: &mut Sha256, value: &str) {
    hash_len(hasher, value.len());
    hasher.update(value.as_bytes());
}

fn hash_strs(hasher: &mut Sha256, values: &BTreeSet<&str>) {
    hash_len(hasher, values.len());
    for value in values {
        hash_str(hasher, value);
    }
}
