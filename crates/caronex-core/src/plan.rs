//! Task plan and step types.

use crate::{CoreError, StepId, StepStatus, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An ordered decomposition of a task description into steps.
///
/// Plans are agent-agnostic: `assigned_agent` on each step holds a
/// capability tag, and `required_agents` the set of those tags. Resolving
/// tags to concrete agents happens at delegation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPlan {
    /// Unique task identifier.
    pub task_id: TaskId,

    /// Original task description, verbatim.
    pub description: String,

    /// Steps in suggested execution order. Never empty.
    pub steps: Vec<TaskStep>,

    /// Deduplicated capability tags referenced by the steps.
    pub required_agents: Vec<String>,

    /// Coarse duration bucket derived from the step count.
    pub estimated_duration: String,

    /// When the plan was created.
    pub created_at: DateTime<Utc>,
}

impl TaskPlan {
    /// Get a step by id.
    pub fn step(&self, step_id: &StepId) -> Option<&TaskStep> {
        self.steps.iter().find(|s| &s.step_id == step_id)
    }

    /// Record a status change reported by an execution engine.
    ///
    /// Only forward transitions are accepted (see [`StepStatus::can_transition_to`]).
    pub fn update_step_status(
        &mut self,
        step_id: &StepId,
        status: StepStatus,
    ) -> Result<(), CoreError> {
        let step = self
            .steps
            .iter_mut()
            .find(|s| &s.step_id == step_id)
            .ok_or_else(|| CoreError::StepNotFound(step_id.to_string()))?;

        if !step.status.can_transition_to(status) {
            return Err(CoreError::InvalidStateTransition {
                from: format!("{:?}", step.status),
                to: format!("{:?}", status),
            });
        }

        step.status = status;
        Ok(())
    }

    /// Check if every step reached a terminal state.
    pub fn is_finished(&self) -> bool {
        self.steps.iter().all(|s| s.status.is_terminal())
    }
}

/// One unit of planned work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStep {
    /// Identifier unique within the plan.
    pub step_id: StepId,

    /// What the step does.
    pub description: String,

    /// Suggested capability tag or agent name. Advisory.
    pub assigned_agent: String,

    /// Steps that must precede this one.
    #[serde(default)]
    pub dependencies: Vec<StepId>,

    /// Execution status.
    #[serde(default)]
    pub status: StepStatus,

    /// Coarse time bucket.
    pub estimated_time: String,
}

impl TaskStep {
    /// Create a new pending step.
    pub fn new(
        step_id: StepId,
        description: impl Into<String>,
        assigned_agent: impl Into<String>,
        estimated_time: impl Into<String>,
    ) -> Self {
        Self {
            step_id,
            description: description.into(),
            assigned_agent: assigned_agent.into(),
            dependencies: Vec::new(),
            status: StepStatus::Pending,
            estimated_time: estimated_time.into(),
        }
    }

    /// Builder method to add a dependency.
    pub fn depends_on(mut self, step_id: StepId) -> Self {
        self.dependencies.push(step_id);
        self
    }
}
