//! Coordinator facade - the public entry point.

use std::fmt;

use thiserror::Error;
use tracing::{info, warn};

use caronex_core::{
    AgentDescriptor, AgentStatus, CoreError, DelegationRecord, ErrorKind, StatusFilter,
    SystemSnapshot, TaskId, TaskPlan,
};

use crate::config::CoordinatorConfig;
use crate::introspection::IntrospectionReporter;
use crate::planner::TaskPlanner;
use crate::registry::CapabilityRegistry;
use crate::resolver::DelegationResolver;

/// Component an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Registry,
    Planner,
    Resolver,
    Coordinator,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Registry => "registry",
            Self::Planner => "planner",
            Self::Resolver => "resolver",
            Self::Coordinator => "coordinator",
        };
        f.write_str(name)
    }
}

/// A component error, tagged with its origin.
#[derive(Debug, Error)]
#[error("{component}: {source}")]
pub struct CoordinatorError {
    pub component: Component,
    #[source]
    pub source: CoreError,
}

impl CoordinatorError {
    fn new(component: Component, source: CoreError) -> Self {
        Self { component, source }
    }

    /// Kind of the underlying error.
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

/// Wires the registry, planner, resolver and reporter together.
///
/// The registry is the only long-lived state and is owned here. Every other
/// result is a fresh value per call.
#[derive(Debug, Default)]
pub struct Coordinator {
    registry: CapabilityRegistry,
    planner: TaskPlanner,
    resolver: DelegationResolver,
    reporter: IntrospectionReporter,
}

impl Coordinator {
    /// Create a coordinator around `registry` with default components.
    pub fn new(registry: CapabilityRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    /// Build a coordinator from configuration, registering its agents.
    pub fn from_config(config: &CoordinatorConfig) -> Result<Self, CoordinatorError> {
        let estimate = config
            .expected_completion()
            .map_err(|e| CoordinatorError::new(Component::Coordinator, e))?;
        let registry = CapabilityRegistry::from_descriptors(config.descriptors())
            .map_err(|e| CoordinatorError::new(Component::Registry, e))?;

        let mut resolver = DelegationResolver::new().with_expected_completion(estimate);
        if let Some(name) = &config.default_agent {
            if !registry.contains(name) {
                warn!(agent = %name, "Configured default agent is not registered");
            }
            resolver = resolver.with_default_agent(name.clone());
        }

        let reporter = match &config.coordinator_capabilities {
            Some(caps) => IntrospectionReporter::new(caps.clone()),
            None => IntrospectionReporter::default(),
        };

        info!(agents = registry.len(), "Coordinator initialized");

        Ok(Self::new(registry)
            .with_resolver(resolver)
            .with_reporter(reporter))
    }

    /// Builder method to replace the resolver.
    pub fn with_resolver(mut self, resolver: DelegationResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Builder method to replace the reporter.
    pub fn with_reporter(mut self, reporter: IntrospectionReporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// The owned registry.
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Register an agent at runtime.
    pub fn register_agent(&self, descriptor: AgentDescriptor) -> Result<(), CoordinatorError> {
        let name = descriptor.name.clone();
        self.registry
            .register(descriptor)
            .map_err(|e| self.fail(Component::Registry, e))?;

        info!(agent = %name, "Agent registered");
        Ok(())
    }

    /// List registered agents in registration order.
    pub fn list_agents(&self, filter: StatusFilter) -> Vec<AgentDescriptor> {
        self.registry.list(filter)
    }

    /// Look up an agent by name.
    pub fn get_agent(&self, name: &str) -> Result<AgentDescriptor, CoordinatorError> {
        self.registry
            .get(name)
            .map_err(|e| self.fail(Component::Registry, e))
    }

    /// Update an agent's status (heartbeat owner only). Returns the previous status.
    pub fn set_agent_status(
        &self,
        name: &str,
        status: AgentStatus,
    ) -> Result<AgentStatus, CoordinatorError> {
        self.registry
            .set_status(name, status)
            .map_err(|e| self.fail(Component::Registry, e))
    }

    /// Plan a task.
    pub fn plan(
        &self,
        description: &str,
        requirements: &[String],
    ) -> Result<TaskPlan, CoordinatorError> {
        let plan = self
            .planner
            .plan(description, requirements)
            .map_err(|e| self.fail(Component::Planner, e))?;

        info!(
            task_id = %plan.task_id,
            steps = plan.steps.len(),
            estimated_duration = %plan.estimated_duration,
            "Task planned"
        );
        Ok(plan)
    }

    /// Delegate a task to the best matching agent.
    pub fn delegate(
        &self,
        task_id: &str,
        description: &str,
        preferred_agent: Option<&str>,
    ) -> Result<DelegationRecord, CoordinatorError> {
        let task_id = TaskId::new(task_id);
        if task_id.is_blank() {
            return Err(self.fail(
                Component::Coordinator,
                CoreError::InvalidInput("task id must not be empty".to_string()),
            ));
        }

        self.resolver
            .delegate(&self.registry, task_id, description, preferred_agent)
            .map_err(|e| self.fail(Component::Resolver, e))
    }

    /// Snapshot the current system state.
    pub fn introspect(&self) -> SystemSnapshot {
        self.reporter.snapshot(&self.registry)
    }

    fn fail(&self, component: Component, error: CoreError) -> CoordinatorError {
        warn!(%component, kind = ?error.kind(), error = %error, "Coordinator operation failed");
        CoordinatorError::new(component, error)
    }
}
