//! Status enums for Agents, Steps, and Delegations.

use serde::{Deserialize, Serialize};

/// Availability of a registered agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentStatus {
    /// Agent is ready to accept work.
    #[default]
    Available,
    /// Agent is working but still eligible for delegation.
    Busy,
    /// Agent is unreachable and never selected.
    Offline,
}

impl AgentStatus {
    /// Returns true if the agent must not receive delegations.
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::Offline)
    }
}

/// Filter applied when listing agents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
    /// No filtering.
    #[default]
    Any,
    Available,
    Busy,
    Offline,
    /// Available or Busy.
    NotOffline,
}

impl StatusFilter {
    /// Check whether an agent status passes this filter.
    pub fn matches(&self, status: AgentStatus) -> bool {
        match self {
            Self::Any => true,
            Self::Available => status == AgentStatus::Available,
            Self::Busy => status == AgentStatus::Busy,
            Self::Offline => status == AgentStatus::Offline,
            Self::NotOffline => !status.is_offline(),
        }
    }
}

/// Status of a planned step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    /// Step planned but not started.
    #[default]
    Pending,
    /// Step being executed.
    InProgress,
    /// Step completed successfully.
    Done,
    /// Step failed.
    Failed,
}

impl StepStatus {
    /// Returns true if the step is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(&self, next: StepStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::InProgress)
                | (Self::Pending, Self::Failed)
                | (Self::InProgress, Self::Done)
                | (Self::InProgress, Self::Failed)
        )
    }
}

/// Outcome of a delegation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DelegationStatus {
    /// Task assigned to an agent.
    Delegated,
    /// Agent declined the assignment.
    Rejected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_transitions() {
        assert!(StepStatus::Pending.can_transition_to(StepStatus::InProgress));
        assert!(StepStatus::InProgress.can_transition_to(StepStatus::Done));
        assert!(!StepStatus::Pending.can_transition_to(StepStatus::Done));
        assert!(!StepStatus::Done.can_transition_to(StepStatus::Failed));
        assert!(!StepStatus::Failed.can_transition_to(StepStatus::InProgress));
    }

    #[test]
    fn test_status_filter() {
        assert!(StatusFilter::Any.matches(AgentStatus::Offline));
        assert!(StatusFilter::NotOffline.matches(AgentStatus::Busy));
        assert!(!StatusFilter::NotOffline.matches(AgentStatus::Offline));
        assert!(!StatusFilter::Available.matches(AgentStatus::Busy));
    }

    #[test]
    fn test_status_serde_names() {
        let json = serde_json::to_string(&StepStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let parsed: AgentStatus = serde_json::from_str("\"OFFLINE\"").unwrap();
        assert_eq!(parsed, AgentStatus::Offline);
    }
}
