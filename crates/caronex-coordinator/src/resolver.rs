//! Delegation resolver - routes a task to a registered agent.

use chrono::Duration;
use tracing::{debug, info};

use caronex_core::{AgentDescriptor, CoreError, DelegationRecord, TaskId};

use crate::planner::{CODE_GENERATION, PLANNING};
use crate::registry::{CapabilityRegistry, RegistryView};

/// Capability tag for summarization.
pub const SUMMARIZATION: &str = "summarization";

/// Capability tag for title generation.
pub const TITLE_GENERATION: &str = "title_generation";

/// Default placeholder for `expected_completion`.
pub const DEFAULT_EXPECTED_COMPLETION_MINUTES: i64 = 60;

/// Maps description keywords to a capability tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    /// Lowercase substrings, any of which triggers the rule.
    pub keywords: Vec<String>,

    /// Capability tag the rule selects.
    pub capability: String,
}

impl KeywordRule {
    /// Create a new rule. Keywords are lowercased.
    pub fn new<I, S>(keywords: I, capability: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
            capability: capability.into(),
        }
    }

    /// Check a lowercased description against this rule.
    fn matches(&self, description_lower: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| description_lower.contains(k.as_str()))
    }
}

/// The built-in keyword table. Order matters: the first matching rule wins.
pub fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(["code", "implement"], CODE_GENERATION),
        KeywordRule::new(["plan", "task"], PLANNING),
        KeywordRule::new(["summary", "summarize"], SUMMARIZATION),
        KeywordRule::new(["title", "name"], TITLE_GENERATION),
    ]
}

/// Resolves tasks to agents.
///
/// Resolution order, first match wins:
/// 1. the preferred agent, if registered and not Offline;
/// 2. the first non-offline agent declaring the capability selected by the
///    keyword table;
/// 3. the default agent.
///
/// Fails with `NoAgentAvailable` when none of these yields an agent.
#[derive(Debug, Clone)]
pub struct DelegationResolver {
    rules: Vec<KeywordRule>,
    default_agent: Option<String>,
    expected_completion: Duration,
}

impl Default for DelegationResolver {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            default_agent: None,
            expected_completion: Duration::minutes(DEFAULT_EXPECTED_COMPLETION_MINUTES),
        }
    }
}

impl DelegationResolver {
    /// Create a resolver with the built-in keyword table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to replace the keyword table.
    pub fn with_rules(mut self, rules: Vec<KeywordRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Builder method to name the fallback agent.
    pub fn with_default_agent(mut self, name: impl Into<String>) -> Self {
        self.default_agent = Some(name.into());
        self
    }

    /// Builder method to set the completion estimate.
    pub fn with_expected_completion(mut self, estimate: Duration) -> Self {
        self.expected_completion = estimate;
        self
    }

    /// Capability tag selected by the keyword table, if any.
    pub fn match_capability(&self, description: &str) -> Option<&str> {
        let lower = description.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lower))
            .map(|rule| rule.capability.as_str())
    }

    /// Resolve `description` to an agent and build the assignment record.
    ///
    /// Reads a single registry view, so `assigned_to` always names an agent
    /// that was registered when the call started.
    pub fn delegate(
        &self,
        registry: &CapabilityRegistry,
        task_id: TaskId,
        description: &str,
        preferred_agent: Option<&str>,
    ) -> Result<DelegationRecord, CoreError> {
        let view = registry.view();

        if let Some(name) = preferred_agent.filter(|n| !n.trim().is_empty()) {
            match check_preferred(&view, name) {
                Ok(agent) => {
                    return self.record(
                        task_id,
                        agent,
                        format!("Delegated to preferred agent '{}'", agent.name),
                    );
                }
                // A preferred agent is a hint; fall through to matching.
                Err(e) => debug!(error = %e, "Ignoring preferred agent"),
            }
        }

        if let Some(capability) = self.match_capability(description) {
            if let Some(agent) = first_with_capability(&view, capability) {
                return self.record(
                    task_id,
                    agent,
                    format!(
                        "Delegated to '{}' by capability '{}'",
                        agent.name, capability
                    ),
                );
            }
            debug!(capability, "No available agent declares matched capability");
        }

        if let Some(agent) = self.fallback(&view) {
            return self.record(
                task_id,
                agent,
                format!("Delegated to default agent '{}'", agent.name),
            );
        }

        Err(CoreError::NoAgentAvailable {
            description: description.to_string(),
        })
    }

    /// Default agent: the configured one, else the first planner, else the
    /// first available agent.
    fn fallback<'a>(&self, view: &'a RegistryView) -> Option<&'a AgentDescriptor> {
        let configured = self
            .default_agent
            .as_deref()
            .and_then(|name| view.get(name))
            .filter(|a| a.is_available());

        configured
            .or_else(|| first_with_capability(view, PLANNING))
            .or_else(|| view.iter().find(|a| a.is_available()))
    }

    fn record(
        &self,
        task_id: TaskId,
        agent: &AgentDescriptor,
        message: String,
    ) -> Result<DelegationRecord, CoreError> {
        let record = DelegationRecord::delegated(
            task_id,
            agent.name.clone(),
            message,
            self.expected_completion,
        )?;
        info!(task_id = %record.task_id, agent = %agent.name, "{}", record.message);
        Ok(record)
    }
}

fn check_preferred<'a>(
    view: &'a RegistryView,
    name: &str,
) -> Result<&'a AgentDescriptor, CoreError> {
    view.get(name)
        .filter(|a| a.is_available())
        .ok_or_else(|| CoreError::InvalidPreferredAgent(name.to_string()))
}

fn first_with_capability<'a>(
    view: &'a RegistryView,
    capability: &str,
) -> Option<&'a AgentDescriptor> {
    view.iter()
        .find(|a| a.is_available() && a.has_capability(capability))
}
