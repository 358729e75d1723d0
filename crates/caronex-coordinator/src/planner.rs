//! Task planner - decomposes a task description into capability-tagged steps.
//!
//! The planner never looks at the registry. Steps carry capability tags, and
//! turning a tag into a concrete agent is the resolver's job.

use chrono::Utc;
use tracing::debug;

use caronex_core::{CoreError, StepId, TaskId, TaskPlan, TaskStep};

/// Capability tag for analysis and planning steps.
pub const PLANNING: &str = "planning";

/// Capability tag for implementation steps.
pub const CODE_GENERATION: &str = "code_generation";

/// Map a step count to a coarse duration bucket.
///
/// Non-decreasing in `step_count`.
pub fn estimate_duration(step_count: usize) -> &'static str {
    match step_count {
        0 | 1 => "1 hour",
        2 | 3 => "2-3 hours",
        _ => "4+ hours",
    }
}

/// Deterministic keyword/step-count planner.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskPlanner;

impl TaskPlanner {
    /// Create a new TaskPlanner.
    pub fn new() -> Self {
        Self
    }

    /// Plan `description` with a freshly generated task id.
    pub fn plan(&self, description: &str, requirements: &[String]) -> Result<TaskPlan, CoreError> {
        self.plan_with_id(TaskId::generate(), description, requirements)
    }

    /// Plan `description` under a caller-supplied task id.
    pub fn plan_with_id(
        &self,
        task_id: TaskId,
        description: &str,
        requirements: &[String],
    ) -> Result<TaskPlan, CoreError> {
        if description.trim().is_empty() {
            return Err(CoreError::EmptyTaskDescription);
        }

        let analyze = StepId::nth(1);
        let mut steps = vec![TaskStep::new(
            analyze.clone(),
            "Analyze requirements and plan approach",
            PLANNING,
            "30 minutes",
        )];

        if !requirements.is_empty() {
            steps.push(
                TaskStep::new(
                    StepId::nth(2),
                    "Implement solution based on requirements",
                    CODE_GENERATION,
                    "1-2 hours",
                )
                .depends_on(analyze),
            );
        }

        let mut required_agents: Vec<String> = Vec::new();
        for step in &steps {
            if !step.assigned_agent.is_empty() && !required_agents.contains(&step.assigned_agent) {
                required_agents.push(step.assigned_agent.clone());
            }
        }

        let estimated_duration = estimate_duration(steps.len()).to_string();

        debug!(
            task_id = %task_id,
            steps = steps.len(),
            requirements = requirements.len(),
            "Task plan created"
        );

        Ok(TaskPlan {
            task_id,
            description: description.to_string(),
            steps,
            required_agents,
            estimated_duration,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reqs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plan_without_requirements() {
        let plan = TaskPlanner::new().plan("Write docs", &[]).unwrap();

        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].assigned_agent, PLANNING);
        assert!(plan.steps[0].dependencies.is_empty());
        assert_eq!(plan.required_agents, vec![PLANNING]);
        assert_eq!(plan.estimated_duration, "1 hour");
    }

    #[test]
    fn test_plan_with_requirements() {
        let plan = TaskPlanner::new()
            .plan(
                "Build a reporting dashboard",
                &reqs(&["needs charts", "needs export"]),
            )
            .unwrap();

        assert_eq!(plan.description, "Build a reporting dashboard");
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[1].assigned_agent, CODE_GENERATION);
        assert_eq!(plan.steps[1].dependencies, vec![StepId::nth(1)]);
        assert!(plan.required_agents.contains(&PLANNING.to_string()));
        assert!(plan.required_agents.contains(&CODE_GENERATION.to_string()));
        assert_eq!(plan.estimated_duration, "2-3 hours");
    }

    #[test]
    fn test_step_count_depends_only_on_requirements_presence() {
        let planner = TaskPlanner::new();
        for n in 0..6 {
            let requirements: Vec<String> = (0..n).map(|i| format!("req {i}")).collect();
            let plan = planner.plan("task", &requirements).unwrap();
            let expected = if n == 0 { 1 } else { 2 };
            assert_eq!(plan.steps.len(), expected, "requirements = {n}");
        }
    }

    #[test]
    fn test_required_agents_cover_assigned_steps() {
        let plan = TaskPlanner::new().plan("task", &reqs(&["x"])).unwrap();
        for step in &plan.steps {
            assert!(plan.required_agents.contains(&step.assigned_agent));
        }
    }

    #[test]
    fn test_empty_description_rejected() {
        let planner = TaskPlanner::new();
        assert_eq!(
            planner.plan("", &[]).unwrap_err(),
            CoreError::EmptyTaskDescription
        );
        assert_eq!(
            planner.plan("   \n", &reqs(&["x"])).unwrap_err(),
            CoreError::EmptyTaskDescription
        );
    }

    #[test]
    fn test_estimate_duration_monotonic() {
        assert_eq!(estimate_duration(1), "1 hour");
        assert_eq!(estimate_duration(3), "2-3 hours");
        assert_eq!(estimate_duration(4), "4+ hours");

        let rank = |s: &str| match s {
            "1 hour" => 0,
            "2-3 hours" => 1,
            _ => 2,
        };
        for n in 1..10 {
            assert!(rank(estimate_duration(n)) <= rank(estimate_duration(n + 1)));
        }
    }

    #[test]
    fn test_plan_with_id_keeps_id() {
        let plan = TaskPlanner::new()
            .plan_with_id(TaskId::new("t-42"), "task", &[])
            .unwrap();
        assert_eq!(plan.task_id.as_str(), "t-42");
    }
}
