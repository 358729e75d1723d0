//! End-to-end scenarios through the public coordinator facade.

use std::sync::Arc;
use std::thread;

use caronex_coordinator::{Coordinator, CoordinatorConfig};
use caronex_core::{AgentDescriptor, AgentStatus, DelegationStatus, ErrorKind, StatusFilter};

fn agent(name: &str, caps: &[&str]) -> AgentDescriptor {
    AgentDescriptor::new(name).with_capabilities(caps.iter().copied())
}

// ============================================================================
// Introspection
// ============================================================================

#[test]
fn test_empty_registry_introspection() {
    let coordinator = Coordinator::default();
    let snapshot = coordinator.introspect();

    assert!(snapshot.available_agents.is_empty());
    assert!(snapshot.has_capability("task_planning"));
    let builtin = ["task_planning", "agent_delegation", "system_introspection"];
    assert!(snapshot
        .system_capabilities
        .iter()
        .all(|c| builtin.contains(&c.as_str())));
}

#[test]
fn test_snapshot_stable_until_registration() {
    let coordinator = Coordinator::default();
    coordinator.register_agent(agent("a", &["planning"])).unwrap();

    let first = coordinator.introspect();
    let second = coordinator.introspect();
    assert_eq!(
        first.configuration_fingerprint,
        second.configuration_fingerprint
    );

    coordinator.register_agent(agent("b", &["code_generation"])).unwrap();
    let third = coordinator.introspect();
    assert_ne!(
        first.configuration_fingerprint,
        third.configuration_fingerprint
    );
}

// ============================================================================
// Delegation
// ============================================================================

#[test]
fn test_delegate_to_coder() {
    let coordinator = Coordinator::default();
    coordinator
        .register_agent(agent("coder", &["code_generation"]))
        .unwrap();

    let record = coordinator
        .delegate("t1", "please implement the login feature", None)
        .unwrap();

    assert_eq!(record.assigned_to, "coder");
    assert_eq!(record.status, DelegationStatus::Delegated);
    assert_eq!(record.task_id.as_str(), "t1");
}

#[test]
fn test_unregistered_preferred_agent_falls_through() {
    let coordinator = Coordinator::default();
    coordinator.register_agent(agent("helper", &["research"])).unwrap();
    coordinator.register_agent(agent("planner", &["planning"])).unwrap();

    let record = coordinator
        .delegate("t2", "split this task up", Some("ghost-agent"))
        .unwrap();
    assert_eq!(record.assigned_to, "planner");

    let record = coordinator
        .delegate("t2", "anything", Some("ghost-agent"))
        .unwrap();
    assert_eq!(record.assigned_to, "planner");
}

#[test]
fn test_only_offline_agents() {
    let coordinator = Coordinator::default();
    coordinator
        .register_agent(agent("a", &["code_generation"]).with_status(AgentStatus::Offline))
        .unwrap();
    coordinator
        .register_agent(agent("b", &["planning"]).with_status(AgentStatus::Offline))
        .unwrap();

    let err = coordinator.delegate("t3", "implement", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoAgentAvailable);
}

#[test]
fn test_delegation_determinism() {
    let coordinator = Coordinator::default();
    coordinator.register_agent(agent("p", &["planning"])).unwrap();
    coordinator.register_agent(agent("c", &["code_generation"])).unwrap();
    coordinator.register_agent(agent("s", &["summarization"])).unwrap();

    let names: Vec<String> = coordinator
        .list_agents(StatusFilter::Any)
        .into_iter()
        .map(|a| a.name)
        .collect();

    for description in ["write code", "summary please", "title this", "misc"] {
        let a = coordinator.delegate("t", description, None).unwrap();
        let b = coordinator.delegate("t", description, None).unwrap();
        assert_eq!(a.assigned_to, b.assigned_to);
        assert!(names.contains(&a.assigned_to));
    }
}

// ============================================================================
// Planning
// ============================================================================

#[test]
fn test_plan_dashboard() {
    let coordinator = Coordinator::default();
    let plan = coordinator
        .plan(
            "Build a reporting dashboard",
            &["needs charts".to_string(), "needs export".to_string()],
        )
        .unwrap();

    assert_eq!(plan.steps.len(), 2);
    assert!(plan.required_agents.contains(&"planning".to_string()));
    assert!(plan.required_agents.contains(&"code_generation".to_string()));
    assert_eq!(plan.estimated_duration, "2-3 hours");
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_duplicate_registration() {
    let coordinator = Coordinator::default();
    coordinator.register_agent(agent("coder", &[])).unwrap();

    let err = coordinator.register_agent(agent("coder", &[])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateAgentName);
    assert_eq!(coordinator.list_agents(StatusFilter::Any).len(), 1);
}

#[test]
fn test_concurrent_readers_and_writers() {
    let coordinator = Arc::new(Coordinator::default());
    coordinator.register_agent(agent("seed", &["planning"])).unwrap();

    let writer = {
        let coordinator = coordinator.clone();
        thread::spawn(move || {
            for i in 0..50 {
                coordinator
                    .register_agent(agent(&format!("w{i}"), &["code_generation"]))
                    .unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let coordinator = coordinator.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    let record = coordinator.delegate("t", "implement", None).unwrap();
                    assert!(coordinator.registry().contains(&record.assigned_to));
                    let snapshot = coordinator.introspect();
                    assert!(!snapshot.available_agents.is_empty());
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(coordinator.list_agents(StatusFilter::Any).len(), 51);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_driven_coordinator() {
    let config = CoordinatorConfig::from_json_str(
        r#"{
            "agents": [
                {"name": "caronex", "capabilities": ["planning", "coordination"], "specialization_mode": "cooperative"},
                {"name": "coder", "capabilities": ["code_generation"]},
                {"name": "summarizer", "capabilities": ["summarization"], "status": "OFFLINE"}
            ],
            "default_agent": "caronex"
        }"#,
    )
    .unwrap();
    let coordinator = Coordinator::from_config(&config).unwrap();

    let snapshot = coordinator.introspect();
    assert_eq!(snapshot.agent_names(), vec!["caronex", "coder"]);

    let record = coordinator.delegate("t1", "summarize notes", None).unwrap();
    assert_eq!(record.assigned_to, "caronex");
}
