//! Caronex CLI - inspect the coordinator, plan and delegate tasks.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use caronex_coordinator::{tools, Coordinator, CoordinatorConfig};
use caronex_core::StatusFilter;

/// Caronex CLI - agent coordination tool
#[derive(Parser)]
#[command(name = "caronex")]
#[command(about = "Plan, delegate and introspect Caronex agents", long_about = None)]
struct Cli {
    /// Agent configuration file (JSON)
    #[arg(short, long, env = "CARONEX_CONFIG")]
    config: Option<PathBuf>,

    /// Log level directive (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show available agents, capabilities and the configuration fingerprint
    Introspect,

    /// List registered agents
    Agents {
        /// Only show agents with this status
        #[arg(short, long, value_enum, default_value_t = StatusArg::Any)]
        status: StatusArg,
    },

    /// Decompose a task into steps
    Plan {
        /// Task description
        description: String,

        /// Requirement (repeatable)
        #[arg(short, long = "requirement")]
        requirements: Vec<String>,
    },

    /// Assign a task to an agent
    Delegate {
        /// Task description
        description: String,

        /// Task ID (generated when omitted)
        #[arg(short, long)]
        task_id: Option<String>,

        /// Preferred agent name
        #[arg(short, long)]
        agent: Option<String>,
    },

    /// Call a builtin tool with JSON parameters
    Tool {
        /// Tool name
        #[arg(value_parser = clap::builder::PossibleValuesParser::new(tools::TOOL_NAMES))]
        name: String,

        /// Tool parameters as a JSON object
        #[arg(short, long, default_value = "{}")]
        params: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Any,
    Available,
    Busy,
    Offline,
    NotOffline,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Any => StatusFilter::Any,
            StatusArg::Available => StatusFilter::Available,
            StatusArg::Busy => StatusFilter::Busy,
            StatusArg::Offline => StatusFilter::Offline,
            StatusArg::NotOffline => StatusFilter::NotOffline,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let config = match &cli.config {
        Some(path) => {
            debug!(path = %path.display(), "Loading configuration");
            CoordinatorConfig::load(path)?
        }
        None => CoordinatorConfig::default(),
    };
    let coordinator = Coordinator::from_config(&config)?;

    match cli.command {
        Commands::Introspect => {
            print_json(&coordinator.introspect())?;
        }
        Commands::Agents { status } => {
            print_json(&coordinator.list_agents(status.into()))?;
        }
        Commands::Plan {
            description,
            requirements,
        } => {
            print_json(&coordinator.plan(&description, &requirements)?)?;
        }
        Commands::Delegate {
            description,
            task_id,
            agent,
        } => {
            let task_id = task_id.unwrap_or_else(|| caronex_core::TaskId::generate().into_inner());
            let record = coordinator.delegate(&task_id, &description, agent.as_deref())?;
            info!(task_id = %record.task_id, agent = %record.assigned_to, "Task delegated");
            print_json(&record)?;
        }
        Commands::Tool { name, params } => {
            let params: serde_json::Value = serde_json::from_str(&params)?;
            print_json(&tools::dispatch(&coordinator, &name, params))?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
