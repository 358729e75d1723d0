//! Caronex Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network or file I/O
//! - Logging backends
//! - Runtime specifics
//!
//! All types here are value objects describing agents, plans, delegations
//! and introspection snapshots. They are serializable so callers can hand
//! them straight to a JSON encoder.

pub mod agent;
pub mod delegation;
pub mod error;
pub mod ids;
pub mod plan;
pub mod snapshot;
pub mod status;

// Re-export commonly used types
pub use agent::AgentDescriptor;
pub use delegation::DelegationRecord;
pub use error::{CoreError, ErrorKind};
pub use ids::{StepId, TaskId};
pub use plan::{TaskPlan, TaskStep};
pub use snapshot::{AgentCapabilities, SystemSnapshot};
pub use status::{AgentStatus, DelegationStatus, StatusFilter, StepStatus};
