//! Builtin coordination tools.
//!
//! JSON-in/JSON-out wrappers around the [`Coordinator`] for chat turns and
//! MCP-style callers. Every tool answers with a [`ToolResponse`] envelope
//! carrying either a result or an error code.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use caronex_core::{
    AgentDescriptor, DelegationRecord, StatusFilter, SystemSnapshot, TaskId, TaskPlan,
};

use crate::coordinator::{Coordinator, CoordinatorError};

/// Names of the builtin tools.
pub const TOOL_NAMES: [&str; 4] = [
    "system_introspection",
    "task_planning",
    "agent_delegation",
    "list_agents",
];

// ============================================================================
// Envelope
// ============================================================================

/// Generic tool request wrapper.
#[derive(Debug, Deserialize)]
pub struct ToolRequest<T> {
    /// Tool-specific parameters.
    pub params: T,
}

/// Generic tool response wrapper.
#[derive(Debug, Serialize)]
pub struct ToolResponse<T> {
    /// Tool result on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,

    /// Error details on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl<T> ToolResponse<T> {
    /// Create a success response.
    pub fn ok(result: T) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(code: &str, message: &str) -> Self {
        Self {
            result: None,
            error: Some(ToolError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }

    fn from_result(result: Result<T, CoordinatorError>) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(e) => Self::err(e.kind().code(), &e.to_string()),
        }
    }
}

/// Tool error details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code, e.g. `NO_AGENT_AVAILABLE`.
    pub code: String,

    /// Diagnostic message.
    pub message: String,
}

// ============================================================================
// system_introspection
// ============================================================================

/// Parameters for system_introspection (none required).
#[derive(Debug, Default, Deserialize)]
pub struct SystemIntrospectionParams {}

/// Report agents, capabilities and the configuration fingerprint.
pub fn system_introspection(
    coordinator: &Coordinator,
    _request: ToolRequest<SystemIntrospectionParams>,
) -> ToolResponse<SystemSnapshot> {
    ToolResponse::ok(coordinator.introspect())
}

// ============================================================================
// task_planning
// ============================================================================

/// Parameters for task_planning.
#[derive(Debug, Deserialize)]
pub struct TaskPlanningParams {
    /// Free-text task description.
    pub task_description: String,

    /// Structured requirements.
    #[serde(default)]
    pub requirements: Vec<String>,
}

/// Decompose a task into capability-tagged steps.
pub fn task_planning(
    coordinator: &Coordinator,
    request: ToolRequest<TaskPlanningParams>,
) -> ToolResponse<TaskPlan> {
    let params = request.params;
    ToolResponse::from_result(coordinator.plan(&params.task_description, &params.requirements))
}

// ============================================================================
// agent_delegation
// ============================================================================

/// Parameters for agent_delegation.
#[derive(Debug, Deserialize)]
pub struct AgentDelegationParams {
    /// Task to delegate. Generated when absent.
    #[serde(default)]
    pub task_id: Option<String>,

    /// Free-text task description.
    pub task_description: String,

    /// Agent to prefer, if eligible.
    #[serde(default)]
    pub preferred_agent: Option<String>,
}

/// Assign a task to the best matching agent.
pub fn agent_delegation(
    coordinator: &Coordinator,
    request: ToolRequest<AgentDelegationParams>,
) -> ToolResponse<DelegationRecord> {
    let params = request.params;
    let task_id = params
        .task_id
        .unwrap_or_else(|| TaskId::generate().into_inner());

    ToolResponse::from_result(coordinator.delegate(
        &task_id,
        &params.task_description,
        params.preferred_agent.as_deref(),
    ))
}

// ============================================================================
// list_agents
// ============================================================================

/// Parameters for list_agents.
#[derive(Debug, Default, Deserialize)]
pub struct ListAgentsParams {
    /// Optional status filter.
    #[serde(default)]
    pub status: StatusFilter,
}

/// Result of list_agents.
#[derive(Debug, Serialize)]
pub struct ListAgentsResult {
    pub agents: Vec<AgentDescriptor>,
}

/// List registered agents in registration order.
pub fn list_agents(
    coordinator: &Coordinator,
    request: ToolRequest<ListAgentsParams>,
) -> ToolResponse<ListAgentsResult> {
    ToolResponse::ok(ListAgentsResult {
        agents: coordinator.list_agents(request.params.status),
    })
}

// ============================================================================
// Dispatch
// ============================================================================

/// Run tool `name` with JSON `params` and return the JSON response envelope.
///
/// `null` params are treated as an empty object.
pub fn dispatch(coordinator: &Coordinator, name: &str, params: Value) -> Value {
    let params = if params.is_null() { json!({}) } else { params };
    debug!(tool = %name, "Dispatching tool call");

    match name {
        "system_introspection" => call(coordinator, params, system_introspection),
        "task_planning" => call(coordinator, params, task_planning),
        "agent_delegation" => call(coordinator, params, agent_delegation),
        "list_agents" => call(coordinator, params, list_agents),
        _ => {
            warn!(tool = %name, "Unknown tool");
            to_json(ToolResponse::<()>::err(
                "UNKNOWN_TOOL",
                &format!("Unknown tool: {}", name),
            ))
        }
    }
}

fn call<P, T, F>(coordinator: &Coordinator, params: Value, handler: F) -> Value
where
    P: DeserializeOwned,
    T: Serialize,
    F: FnOnce(&Coordinator, ToolRequest<P>) -> ToolResponse<T>,
{
    match serde_json::from_value::<P>(params) {
        Ok(params) => to_json(handler(coordinator, ToolRequest { params })),
        Err(e) => to_json(ToolResponse::<()>::err("INVALID_PARAMS", &e.to_string())),
    }
}

fn to_json<T: Serialize>(response: ToolResponse<T>) -> Value {
    serde_json::to_value(&response).unwrap_or_else(|e| {
        json!({ "error": { "code": "SERIALIZATION", "message": e.to_string() } })
    })
}
