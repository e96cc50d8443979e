//! CLI entrypoint for errand-agent
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use errand_application::{
    ConversationStore, GetHistoryUseCase, SendMessageUseCase, StartConversationUseCase,
};
use errand_domain::{ModelPlanner, PlanValidator, Planner, RulePlanner};
use errand_infrastructure::{
    build_factory, default_registry, ConfigLoader, FileConfig, InMemoryConversationStore,
};
use errand_presentation::{router, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "errand-agent", about = "Agent that plans and runs business errands")]
struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Explicit config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ignore config files and use built-in defaults
    #[arg(long, global = true)]
    no_config: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Bind address, overriding the configured one
        #[arg(long)]
        addr: Option<String>,
    },
    /// Run a single turn and print the answer
    Ask {
        /// The goal to plan and execute
        goal: String,
        /// User id the conversation is created for
        #[arg(long, default_value = "user123")]
        user: String,
    },
    /// Show model provider status
    Providers,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e.to_string()))?
    };

    match cli.command {
        Command::Serve { addr } => serve(&config, addr).await,
        Command::Ask { goal, user } => ask(&config, &goal, &user).await,
        Command::Providers => {
            print!("{}", build_factory(&config.llm).status_report());
            Ok(())
        }
    }
}

/// Wire all layers into the HTTP handler state.
fn wire(config: &FileConfig) -> Result<AppState> {
    let store: Arc<dyn ConversationStore> = Arc::new(InMemoryConversationStore::new());
    let registry = Arc::new(default_registry());
    let factory = Arc::new(build_factory(&config.llm));

    let validator = PlanValidator::new(config.tools.allowed.iter().cloned());
    let planner: Arc<dyn Planner> = match config.planner.kind.as_str() {
        "rules" => Arc::new(RulePlanner::new()),
        "model" => {
            // The model planner needs a live provider at startup
            let provider = factory.default_provider()?;
            Arc::new(ModelPlanner::new(provider, validator))
        }
        other => bail!("Unknown planner kind '{}' (expected \"rules\" or \"model\")", other),
    };
    info!(planner = planner.name(), "Planner selected");

    Ok(AppState {
        start: Arc::new(StartConversationUseCase::new(Arc::clone(&store))),
        send: Arc::new(SendMessageUseCase::new(
            Arc::clone(&store),
            registry,
            Arc::clone(&factory),
            planner,
        )),
        history: Arc::new(GetHistoryUseCase::new(store)),
        factory,
    })
}

async fn serve(config: &FileConfig, addr_override: Option<String>) -> Result<()> {
    let state = wire(config)?;
    let addr = addr_override.unwrap_or_else(|| config.server.addr.clone());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "errand-agent listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn ask(config: &FileConfig, goal: &str, user: &str) -> Result<()> {
    let state = wire(config)?;

    let conversation = state.start.execute(user).await?;
    let answer = state.send.execute(conversation.id, goal).await?;

    println!("{}", answer.content);
    if let Some(tools) = &answer.tools_used {
        println!();
        println!("Tools used: {}", tools.join(", "));
    }

    Ok(())
}
