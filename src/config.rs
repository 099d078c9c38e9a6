//! Learner configuration.

use std::{collections::BTreeMap, fs::File, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Closed interval `[lo, hi]` that option values are spread over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionRange {
    pub lo: f64,
    pub hi: f64,
}

impl OptionRange {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    fn validate(&self, context: &str, options: usize) -> Result<()> {
        if !self.lo.is_finite() || !self.hi.is_finite() {
            return Err(Error::invalid_config(format!(
                "{context} range must be finite, got [{}, {}]",
                self.lo, self.hi
            )));
        }
        if self.lo > self.hi {
            return Err(Error::invalid_config(format!(
                "{context} range is inverted: [{}, {}]",
                self.lo, self.hi
            )));
        }
        if options > 1 && self.lo == self.hi {
            return Err(Error::invalid_config(format!(
                "{context} range [{}, {}] is empty but {options} distinct options are required",
                self.lo, self.hi
            )));
        }
        Ok(())
    }
}

impl Default for OptionRange {
    fn default() -> Self {
        Self::new(2.0, 8.0)
    }
}

/// Configuration for a [`crate::q_learning::PairwiseLearner`].
///
/// All tuning constants live here; nothing is process-global.
///
/// # Examples
///
/// ```
/// use lattice_q::LearnerConfig;
///
/// let config = LearnerConfig::new(3)
///     .with_options(3)
///     .with_range(2.0, 8.0)
///     .with_explore_rate(0.0)
///     .with_seed(7);
/// config.validate()?;
/// # Ok::<(), lattice_q::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// Number of agents in the swarm
    pub agents: usize,
    /// Number of options per agent
    pub options: usize,
    /// Range the options are evenly spaced over
    pub option_range: OptionRange,
    /// Per-agent range overrides; the option count stays shared
    pub agent_ranges: BTreeMap<usize, OptionRange>,
    /// Probability of exploring (uniform random option) instead of exploiting
    pub explore_rate: f64,
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount: f64,
    /// Additive constant in both sum and count of the reward average
    pub reward_smoothing: f64,
    /// Ticks an action is held before the next epoch may start
    pub time_horizon: u64,
    /// Maximum agent speed allowed at an epoch boundary
    pub velocity_horizon: f64,
    /// History is flushed once the update counter exceeds this value
    pub persist_threshold: u64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl LearnerConfig {
    /// Reference configuration for a swarm of `agents` agents.
    pub fn new(agents: usize) -> Self {
        Self {
            agents,
            options: 3,
            option_range: OptionRange::default(),
            agent_ranges: BTreeMap::new(),
            explore_rate: 1.0,
            learning_rate: 0.5,
            discount: 0.8,
            reward_smoothing: 0.0001,
            time_horizon: 250,
            velocity_horizon: 0.2,
            persist_threshold: 10,
            seed: None,
        }
    }

    pub fn with_options(mut self, options: usize) -> Self {
        self.options = options;
        self
    }

    pub fn with_range(mut self, lo: f64, hi: f64) -> Self {
        self.option_range = OptionRange::new(lo, hi);
        self
    }

    /// Override the option range of a single agent.
    pub fn with_agent_range(mut self, agent: usize, lo: f64, hi: f64) -> Self {
        self.agent_ranges.insert(agent, OptionRange::new(lo, hi));
        self
    }

    pub fn with_explore_rate(mut self, explore_rate: f64) -> Self {
        self.explore_rate = explore_rate;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_time_horizon(mut self, ticks: u64, velocity: f64) -> Self {
        self.time_horizon = ticks;
        self.velocity_horizon = velocity;
        self
    }

    pub fn with_persist_threshold(mut self, threshold: u64) -> Self {
        self.persist_threshold = threshold;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Range used by `agent`, honouring overrides.
    pub fn range_for(&self, agent: usize) -> OptionRange {
        self.agent_ranges
            .get(&agent)
            .copied()
            .unwrap_or(self.option_range)
    }

    /// Check every field for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.agents < 2 {
            return Err(Error::invalid_config(format!(
                "at least two agents are required, got {}",
                self.agents
            )));
        }
        if self.options == 0 {
            return Err(Error::invalid_config("option count must be at least 1"));
        }
        self.option_range.validate("option", self.options)?;
        for (&agent, range) in &self.agent_ranges {
            if agent >= self.agents {
                return Err(Error::invalid_config(format!(
                    "range override for agent {agent} but swarm has {} agents",
                    self.agents
                )));
            }
            range.validate(&format!("agent {agent}"), self.options)?;
        }
        for (name, value) in [
            ("explore_rate", self.explore_rate),
            ("learning_rate", self.learning_rate),
            ("discount", self.discount),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::invalid_config(format!(
                    "{name} must lie in [0, 1], got {value}"
                )));
            }
        }
        if !(self.reward_smoothing.is_finite() && self.reward_smoothing > 0.0) {
            return Err(Error::invalid_config(format!(
                "reward_smoothing must be positive and finite, got {}",
                self.reward_smoothing
            )));
        }
        if !(self.velocity_horizon.is_finite() && self.velocity_horizon >= 0.0) {
            return Err(Error::invalid_config(format!(
                "velocity_horizon must be non-negative and finite, got {}",
                self.velocity_horizon
            )));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {path:?}"),
            source,
        })?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create config {path:?}"),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self::new(5)
    }
}
