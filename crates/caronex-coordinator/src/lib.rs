//! Caronex Coordinator Library
//!
//! This crate provides the agent coordination layer for Caronex: a
//! capability registry, a deterministic task planner, a delegation resolver,
//! an introspection reporter, and the [`Coordinator`] facade wiring them
//! together. Builtin JSON tools expose the facade to chat or MCP style callers.
//!
//! Nothing here executes tasks. Delegation produces an assignment record for
//! an external agent runtime to act on.

pub mod config;
pub mod coordinator;
pub mod introspection;
pub mod planner;
pub mod registry;
pub mod resolver;
pub mod tools;

pub use config::{AgentConfig, ConfigError, CoordinatorConfig};
pub use coordinator::{Component, Coordinator, CoordinatorError};
pub use introspection::IntrospectionReporter;
pub use planner::TaskPlanner;
pub use registry::{CapabilityRegistry, RegistryView};
pub use resolver::{DelegationResolver, KeywordRule};
