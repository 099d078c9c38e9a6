//! lattice-q CLI - Learn flocking lattice spacing with pairwise Q-learning
//!
//! This CLI provides:
//! - Running the demonstration swarm with a learning spacing matrix
//! - Inspecting persisted Q-table snapshot histories

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lattice-q")]
#[command(version, about = "Pairwise Q-learning of flocking lattice spacing", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demonstration swarm
    Simulate(Box<lattice_q::cli::commands::simulate::SimulateArgs>),

    /// Show the greedy spacing stored in a snapshot history
    Inspect(lattice_q::cli::commands::inspect::InspectArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Simulate(args) => lattice_q::cli::commands::simulate::execute(*args),
        Commands::Inspect(args) => lattice_q::cli::commands::inspect::execute(args),
    }
}
