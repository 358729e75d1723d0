//! Delegation record type.

use crate::{CoreError, DelegationStatus, TaskId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Assignment of a task to a named agent.
///
/// A record is not a result: the assigned agent performs the work and
/// reports back through a separate channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegationRecord {
    /// Task being delegated.
    pub task_id: TaskId,

    /// Name of the registered agent receiving the task.
    pub assigned_to: String,

    /// Delegation outcome.
    pub status: DelegationStatus,

    /// Human-readable note on how the agent was chosen.
    pub message: String,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// Placeholder completion estimate (`created_at` plus a fixed duration).
    pub expected_completion: DateTime<Utc>,
}

impl DelegationRecord {
    /// Create a delegated record for `assigned_to`.
    ///
    /// Fails with `InvalidInput` when `estimate` is negative or pushes
    /// `expected_completion` past the representable date range.
    pub fn delegated(
        task_id: TaskId,
        assigned_to: impl Into<String>,
        message: impl Into<String>,
        estimate: Duration,
    ) -> Result<Self, CoreError> {
        if estimate < Duration::zero() {
            return Err(CoreError::InvalidInput(format!(
                "expected completion estimate must not be negative: {}",
                estimate
            )));
        }

        let created_at = Utc::now();
        let expected_completion = created_at.checked_add_signed(estimate).ok_or_else(|| {
            CoreError::InvalidInput(format!(
                "expected completion estimate out of range: {}",
                estimate
            ))
        })?;

        Ok(Self {
            task_id,
            assigned_to: assigned_to.into(),
            status: DelegationStatus::Delegated,
            message: message.into(),
            created_at,
            expected_completion,
        })
    }
}
