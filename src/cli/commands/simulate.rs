//! Simulate command - Run the demonstration swarm with a learning lattice

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use serde_json::to_writer_pretty;
use tracing::info;

use crate::{
    LearnerConfig,
    adapters::{BackgroundSnapshotRepository, JsonSnapshotRepository, MsgPackLearnerRepository},
    cli::{
        config::RunConfig,
        output::{format_number, print_kv, print_section},
    },
    pipeline::{
        EpochMode, JsonlObserver, ProgressObserver, RewardTrace, SimulationConfig,
        SimulationSummary, SwarmSimulation,
    },
    ports::LearnerRepository,
    q_learning::PairwiseLearner,
};

/// Epoch trigger selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Global,
    Local,
}

impl From<ModeArg> for EpochMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Global => EpochMode::Global,
            ModeArg::Local => EpochMode::Local,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Run the demonstration swarm and learn lattice spacing")]
pub struct SimulateArgs {
    /// JSON file with `learner` and `simulation` sections
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of agents in the swarm
    #[arg(long, short = 'n')]
    pub agents: Option<usize>,

    /// Number of landmarks
    #[arg(long)]
    pub landmarks: Option<usize>,

    /// Number of integration steps
    #[arg(long, short = 's')]
    pub steps: Option<u64>,

    /// Initial explore probability
    #[arg(long)]
    pub explore_rate: Option<f64>,

    /// Ticks per decision epoch
    #[arg(long)]
    pub time_horizon: Option<u64>,

    /// Updates buffered before the snapshot history is written
    #[arg(long)]
    pub persist_threshold: Option<u64>,

    /// Epoch trigger
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Snapshot history file
    #[arg(long, default_value = "Data/data_Q.json")]
    pub snapshot: PathBuf,

    /// Write snapshots from a background thread
    #[arg(long)]
    pub background: bool,

    /// Optional file for JSONL epoch observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Resume from a learner checkpoint
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Write a learner checkpoint when the run ends
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,
}

#[derive(Debug, Serialize)]
struct SimulationSummaryFile<'a> {
    simulation: &'a SimulationSummary,
    learner: &'a LearnerConfig,
    mode: EpochMode,
    seed: Option<u64>,
}

/// Layer the config file and command-line flags over `base`.
///
/// `base` is the checkpoint's config on resume and the defaults otherwise.
/// A config file replaces it wholesale; flags then override single fields.
fn resolve_configs(
    args: &SimulateArgs,
    base: LearnerConfig,
) -> Result<(LearnerConfig, SimulationConfig)> {
    let (mut learner, mut simulation) = match &args.config {
        Some(path) => {
            let RunConfig {
                learner,
                simulation,
            } = RunConfig::load(path)?;
            (learner, simulation)
        }
        None => (base, SimulationConfig::default()),
    };

    if let Some(agents) = args.agents {
        learner.agents = agents;
    }
    if let Some(landmarks) = args.landmarks {
        simulation.landmarks = landmarks;
    }
    if let Some(steps) = args.steps {
        simulation.steps = steps;
    }
    if let Some(explore_rate) = args.explore_rate {
        learner.explore_rate = explore_rate;
    }
    if let Some(ticks) = args.time_horizon {
        learner.time_horizon = ticks;
    }
    if let Some(threshold) = args.persist_threshold {
        learner.persist_threshold = threshold;
    }
    if let Some(mode) = args.mode {
        simulation.mode = mode.into();
    }
    if let Some(seed) = args.seed {
        learner.seed = Some(seed);
        simulation.seed = Some(seed);
    }

    learner.validate()?;
    Ok((learner, simulation))
}

/// Build the learner for this run, restoring a checkpoint when asked.
fn load_learner(args: &SimulateArgs) -> Result<(PairwiseLearner, SimulationConfig)> {
    let Some(path) = &args.resume else {
        let (config, simulation) = resolve_configs(args, LearnerConfig::default())?;
        return Ok((PairwiseLearner::new(config)?, simulation));
    };
    let saved = MsgPackLearnerRepository::new()
        .load(path)
        .with_context(|| format!("Failed to load learner: {}", path.display()))?;
    let mut learner = PairwiseLearner::from_saved(saved)?;
    let (config, simulation) = resolve_configs(args, learner.config().clone())?;
    if learner.config().agents != config.agents {
        return Err(anyhow!(
            "Checkpoint has {} agents but the run asks for {}",
            learner.config().agents,
            config.agents
        ));
    }
    learner
        .reconfigure(config)
        .with_context(|| format!("Checkpoint {} does not fit this run", path.display()))?;
    info!(path = %path.display(), sweeps = learner.sweeps(), "resumed learner");
    Ok((learner, simulation))
}

fn write_summary(path: &Path, file: &SimulationSummaryFile<'_>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let writer = File::create(path)
        .with_context(|| format!("Failed to create summary: {}", path.display()))?;
    to_writer_pretty(writer, file)?;
    Ok(())
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    let (mut learner, simulation_config) = load_learner(&args)?;
    let json_repository = JsonSnapshotRepository::new(&args.snapshot);
    let mut write_failures = None;
    learner = if args.background {
        let background = BackgroundSnapshotRepository::spawn(json_repository)?;
        write_failures = Some(background.failures());
        learner.with_repository(Box::new(background))
    } else {
        learner.with_repository(Box::new(json_repository))
    };

    let trace = RewardTrace::new();
    let mut simulation = SwarmSimulation::new(simulation_config.clone(), &learner)?
        .with_observer(Box::new(trace.clone()));
    if args.progress {
        simulation = simulation.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        simulation = simulation.with_observer(Box::new(JsonlObserver::new(path)?));
    }

    let mut summary = simulation.run(&mut learner)?;

    let learner_config = learner.config().clone();
    let saved = learner.to_saved();
    // Dropping the learner drains any queued background writes.
    drop(learner);
    if let Some(failures) = write_failures {
        summary.record_failed_writes(failures.take().len());
    }

    print_section("Simulation Complete");
    print_kv("Agents", &learner_config.agents.to_string());
    print_kv("Steps", &format_number(summary.steps));
    print_kv("Epochs", &format_number(summary.epochs));
    print_kv("Final reward", &format!("{:.6}", summary.final_reward));
    print_kv("Mean reward", &format!("{:.6}", summary.mean_reward));
    if let Some(tail) = trace.trailing_mean(10) {
        print_kv("Last 10 epochs", &format!("{tail:.6}"));
    }
    print_kv("Flushes", &summary.flushes.to_string());
    if summary.failed_flushes > 0 {
        print_kv("Failed flushes", &summary.failed_flushes.to_string());
    }
    print_kv("Snapshots", &args.snapshot.display().to_string());

    if let Some(path) = &args.summary {
        write_summary(
            path,
            &SimulationSummaryFile {
                simulation: &summary,
                learner: &learner_config,
                mode: simulation_config.mode,
                seed: simulation_config.seed,
            },
        )?;
        print_kv("Summary", &path.display().to_string());
    }

    if let Some(path) = &args.output {
        MsgPackLearnerRepository::new().save(&saved, path)?;
        print_kv("Checkpoint", &path.display().to_string());
    }

    Ok(())
}
