//! Observer implementations for simulation runs
//!
//! Observers allow composable data collection during a run without coupling
//! the simulation loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::{Arc, Mutex},
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::EpochObserver,
    q_learning::{EpochReport, Persistence, SelectionMode},
    types::PairScope,
};

/// One decision epoch as written to a JSONL file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochObservation {
    /// Simulation step at which the epoch closed
    pub step: u64,
    pub scope: PairScope,
    pub reward: f64,
    /// Selection mode for the next epoch
    pub mode: SelectionMode,
    pub update_count: u64,
    pub persistence: Persistence,
}

impl EpochObservation {
    pub fn new(step: u64, report: &EpochReport) -> Self {
        Self {
            step,
            scope: report.scope,
            reward: report.reward,
            mode: report.mode,
            update_count: report.update.update_count,
            persistence: report.update.persistence.clone(),
        }
    }
}

/// Progress bar observer - Shows simulation progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    epochs: u64,
    last_reward: f64,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            epochs: 0,
            last_reward: 0.0,
        }
    }

    fn message(&self) -> String {
        format!("{} epochs, reward {:.4}", self.epochs, self.last_reward)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl EpochObserver for ProgressObserver {
    fn on_run_start(&mut self, total_steps: u64) -> Result<()> {
        let pb = ProgressBar::new(total_steps);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} steps ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_step(&mut self, _step: u64) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
        }
        Ok(())
    }

    fn on_epoch(&mut self, _step: u64, report: &EpochReport) -> Result<()> {
        self.epochs += 1;
        self.last_reward = report.reward;
        if let Some(pb) = &self.progress_bar {
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// JSONL observer - Writes one JSON object per decision epoch
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl EpochObserver for JsonlObserver {
    fn on_epoch(&mut self, step: u64, report: &EpochReport) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &EpochObservation::new(step, report))?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Reward trace - Keeps `(step, reward)` for every epoch in memory
///
/// Clones share the same trace, so a handle can be kept after the observer
/// is handed to a simulation.
#[derive(Debug, Clone, Default)]
pub struct RewardTrace {
    rewards: Arc<Mutex<Vec<(u64, f64)>>>,
}

impl RewardTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rewards(&self) -> Vec<(u64, f64)> {
        self.rewards.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.rewards.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mean reward over the last `window` epochs.
    pub fn trailing_mean(&self, window: usize) -> Option<f64> {
        let rewards = self.rewards.lock().unwrap();
        let tail = &rewards[rewards.len().saturating_sub(window)..];
        if tail.is_empty() {
            None
        } else {
            Some(tail.iter().map(|(_, reward)| reward).sum::<f64>() / tail.len() as f64)
        }
    }
}

impl EpochObserver for RewardTrace {
    fn on_epoch(&mut self, step: u64, report: &EpochReport) -> Result<()> {
        self.rewards.lock().unwrap().push((step, report.reward));
        Ok(())
    }
}
