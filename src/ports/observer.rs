//! Observer port for monitoring decision epochs.

use crate::{Result, q_learning::EpochReport};

/// Observer trait for monitoring a learning run.
///
/// Methods are called in this order:
/// 1. `on_run_start(total_steps)` - once
/// 2. `on_epoch(step, report)` - at every decision epoch closed during a step
/// 3. `on_step(step)` - after every step
/// 4. `on_run_end()` - once
///
/// # Examples
///
/// ```no_run
/// use lattice_q::{ports::EpochObserver, q_learning::EpochReport};
///
/// struct BestReward(f64);
///
/// impl EpochObserver for BestReward {
///     fn on_epoch(&mut self, _step: u64, report: &EpochReport) -> lattice_q::Result<()> {
///         self.0 = self.0.max(report.reward);
///         Ok(())
///     }
/// }
/// ```
pub trait EpochObserver: Send {
    /// Called before the first simulation step.
    fn on_run_start(&mut self, _total_steps: u64) -> Result<()> {
        Ok(())
    }

    /// Called after each simulation step, whether or not an epoch ended.
    fn on_step(&mut self, _step: u64) -> Result<()> {
        Ok(())
    }

    /// Called after a decision epoch completes.
    fn on_epoch(&mut self, _step: u64, _report: &EpochReport) -> Result<()> {
        Ok(())
    }

    /// Called when the run finishes.
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
