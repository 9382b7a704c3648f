//! AutoPay CLI - Console for the simulated AI agent payment network
//!
//! Every invocation starts from the seeded in-memory network: four agents,
//! five historical payments and default settings. Nothing is persisted.
//!
//! # Quick Start
//!
//! ```bash
//! autopay agents list
//! autopay agents register --name ComputeBot-Delta --role Compute --wallet 0xd31 --limit 1500
//! autopay simulate --from agent-001 --to agent-002 --service Compute --units 100
//! autopay logs --search alpha --status completed --export out/alpha.json
//! autopay dashboard --route /logs
//! ```

use std::path::PathBuf;

use autopay_state::{AppState, Selector};
use autopay_types::{PaymentStatus, ServiceType};
use clap::{Parser, Subcommand};
use colored::*;

mod commands;
mod config;
mod display;

use commands::{agents, dashboard, logs, routes, settings, simulate, status};
use config::{AppConfig, LoggingConfig};
use display::ConsoleNotifier;

/// AutoPay - Simulated payments between AI agents
#[derive(Parser)]
#[command(name = "autopay")]
#[command(author = "AutoPay Contributors")]
#[command(version)]
#[command(about = "Register agents, simulate payments and inspect payment logs", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (toml, json or yaml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Print machine-readable JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    /// Skip the artificial settlement and connection delays
    #[arg(long, global = true)]
    instant: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage registered agents
    Agents {
        #[command(subcommand)]
        action: AgentCommands,
    },

    /// Simulate a payment between two agents
    Simulate {
        /// Sender agent id
        #[arg(long, default_value = "")]
        from: String,

        /// Recipient agent id
        #[arg(long, default_value = "")]
        to: String,

        /// Service type (Compute or Storage)
        #[arg(long, default_value = "")]
        service: String,

        /// Usage units
        #[arg(long, default_value = "")]
        units: String,
    },

    /// Search, filter and export the payment log
    Logs {
        /// Case-insensitive match on sender, recipient or transaction id
        #[arg(short, long, default_value = "")]
        search: String,

        /// Service filter: all, compute or storage
        #[arg(long, default_value = "all")]
        service: Selector<ServiceType>,

        /// Status filter: all, completed, pending or failed
        #[arg(long, default_value = "all")]
        status: Selector<PaymentStatus>,

        /// Write the filtered records as JSON to this file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Show payment settings
    Settings {
        /// Restore the default settings
        #[arg(long)]
        reset: bool,
    },

    /// Resolve a path to the view it names
    Routes {
        /// Path such as /agents or /logs
        path: String,
    },

    /// Open the terminal dashboard
    Dashboard {
        /// Initial view
        #[arg(long, default_value = "/")]
        route: String,
    },

    /// Show network summary
    Status,
}

#[derive(Subcommand)]
enum AgentCommands {
    /// List registered agents
    List,

    /// Register a new agent
    Register {
        /// Agent name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Agent role (Compute, Storage or Orchestrator)
        #[arg(short, long, default_value = "")]
        role: String,

        /// Wallet address
        #[arg(short, long, default_value = "")]
        wallet: String,

        /// Spending limit in tokens; defaults to the configured default limit
        #[arg(short, long)]
        limit: Option<String>,
    },

    /// Remove an agent by id
    Remove {
        /// Agent id, e.g. agent-001
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        display::error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.instant {
        config.state.simulation_delay_ms = 0;
        config.state.wallet_connect_delay_ms = 0;
    }

    let dashboard_mode = matches!(cli.command, Commands::Dashboard { .. });
    init_logging(&config.logging, dashboard_mode)?;

    let mut state = AppState::new(config.state.clone());
    if !cli.json && !dashboard_mode {
        print_banner();
        state = state.with_notifier(Box::new(ConsoleNotifier));
    }

    match cli.command {
        Commands::Agents { action } => match action {
            AgentCommands::List => agents::list(&state, cli.json)?,
            AgentCommands::Register {
                name,
                role,
                wallet,
                limit,
            } => agents::register(&mut state, name, role, wallet, limit, cli.json)?,
            AgentCommands::Remove { id } => agents::remove(&mut state, &id, cli.json)?,
        },
        Commands::Simulate {
            from,
            to,
            service,
            units,
        } => simulate::run(&mut state, from, to, service, units, cli.json).await?,
        Commands::Logs {
            search,
            service,
            status,
            export,
        } => logs::show(&state, search, service, status, export, cli.json)?,
        Commands::Settings { reset } => settings::show(&mut state, reset, cli.json)?,
        Commands::Routes { path } => routes::resolve(&path, cli.json)?,
        Commands::Dashboard { route } => dashboard::run(state, &route, &config).await?,
        Commands::Status => status::show(&state, cli.json)?,
    }

    Ok(())
}

fn print_banner() {
    println!(
        "{} {}",
        "AutoPay".bright_cyan().bold(),
        format!("v{} | simulated agent payment network", env!("CARGO_PKG_VERSION")).bright_black()
    );
}

/// Initialize tracing
///
/// The dashboard owns the terminal, so in that mode logs go to the
/// configured file or nowhere.
fn init_logging(config: &LoggingConfig, dashboard_mode: bool) -> anyhow::Result<()> {
    use std::sync::Mutex;
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if dashboard_mode {
        let Some(path) = config.file.as_ref() else {
            return Ok(());
        };
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let writer = Mutex::new(file);
        match config.format.as_str() {
            "json" => subscriber
                .with(fmt::layer().json().with_writer(writer).with_ansi(false))
                .init(),
            _ => subscriber
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .init(),
        }
        return Ok(());
    }

    match config.format.as_str() {
        "json" => subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        "pretty" => subscriber
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .init(),
        _ => subscriber
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
    }
    Ok(())
}
