//! Capability registry - the coordinator's only long-lived state.
//!
//! Contents are published as an immutable [`RegistryView`] behind an `Arc`.
//! Writers are serialized by a mutex, build the next view from a clone of the
//! current one, and swap it in. Readers clone the `Arc` and never observe a
//! partially applied registration.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::debug;

use caronex_core::{AgentDescriptor, AgentStatus, CoreError, StatusFilter};

/// Immutable view of the registry at one point in time.
#[derive(Debug, Clone, Default)]
pub struct RegistryView {
    /// Agents in insertion order.
    agents: Vec<AgentDescriptor>,

    /// Agent name -> position in `agents`.
    index: HashMap<String, usize>,
}

impl RegistryView {
    /// Get an agent by name.
    pub fn get(&self, name: &str) -> Option<&AgentDescriptor> {
        self.index.get(name).map(|&i| &self.agents[i])
    }

    /// Iterate agents in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &AgentDescriptor> {
        self.agents.iter()
    }

    /// Agents matching `filter`, in insertion order.
    pub fn list(&self, filter: StatusFilter) -> Vec<AgentDescriptor> {
        self.agents
            .iter()
            .filter(|a| filter.matches(a.status))
            .cloned()
            .collect()
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no agent is registered.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Registry of agents and their declared capabilities.
#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    current: RwLock<Arc<RegistryView>>,
    write_lock: Mutex<()>,
}

impl CapabilityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry populated with `descriptors`, in order.
    pub fn from_descriptors<I>(descriptors: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = AgentDescriptor>,
    {
        let registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Current contents. Later registrations do not affect the returned view.
    pub fn view(&self) -> Arc<RegistryView> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Register a new agent.
    ///
    /// Fails with `DuplicateAgentName` if the name is taken; the registry is
    /// unchanged in that case.
    pub fn register(&self, descriptor: AgentDescriptor) -> Result<(), CoreError> {
        if descriptor.name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "agent name must not be empty".to_string(),
            ));
        }

        self.mutate(|view| {
            if view.index.contains_key(&descriptor.name) {
                return Err(CoreError::DuplicateAgentName(descriptor.name.clone()));
            }

            debug!(
                agent = %descriptor.name,
                capabilities = ?descriptor.capabilities,
                "Registering agent"
            );

            view.index.insert(descriptor.name.clone(), view.agents.len());
            view.agents.push(descriptor);
            Ok(())
        })
    }

    /// Update an agent's status, returning the previous one.
    ///
    /// Intended for the owner of agent heartbeats; planning and delegation
    /// never call this.
    pub fn set_status(&self, name: &str, status: AgentStatus) -> Result<AgentStatus, CoreError> {
        self.mutate(|view| {
            let i = *view
                .index
                .get(name)
                .ok_or_else(|| CoreError::AgentNotFound(name.to_string()))?;
            let previous = std::mem::replace(&mut view.agents[i].status, status);

            debug!(agent = %name, ?previous, ?status, "Agent status updated");
            Ok(previous)
        })
    }

    /// Get an agent by name.
    pub fn get(&self, name: &str) -> Result<AgentDescriptor, CoreError> {
        self.view()
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::AgentNotFound(name.to_string()))
    }

    /// List agents matching `filter`, in insertion order.
    pub fn list(&self, filter: StatusFilter) -> Vec<AgentDescriptor> {
        self.view().list(filter)
    }

    /// Capabilities declared by `name`. Empty for unknown agents.
    pub fn capabilities_of(&self, name: &str) -> Vec<String> {
        self.view()
            .get(name)
            .map(|a| a.capabilities.clone())
            .unwrap_or_default()
    }

    /// Check if an agent is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.view().get(name).is_some()
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.view().len()
    }

    /// Whether no agent is registered.
    pub fn is_empty(&self) -> bool {
        self.view().is_empty()
    }

    /// Apply `f` to a copy of the current view and publish it on success.
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut RegistryView) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut next = (*self.view()).clone();
        let out = f(&mut next)?;

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(next);
        Ok(out)
    }
}
