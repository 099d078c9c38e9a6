//! Decision-epoch timing.
//!
//! An action is held for at least `time_horizon` simulation ticks, and a new
//! epoch only begins once the swarm (or the agent, in local mode) has slowed
//! below `velocity_horizon`.

use crate::{
    Error, LearnerConfig, Result,
    types::{Point3, norm},
};

/// Tick counters gating when epochs close.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionClock {
    horizon: u64,
    velocity_horizon: f64,
    ticks: u64,
    agent_ticks: Vec<u64>,
}

impl DecisionClock {
    pub fn new(horizon: u64, velocity_horizon: f64, agents: usize) -> Self {
        Self {
            horizon,
            velocity_horizon,
            ticks: 0,
            agent_ticks: vec![0; agents],
        }
    }

    pub fn from_config(config: &LearnerConfig) -> Self {
        Self::new(config.time_horizon, config.velocity_horizon, config.agents)
    }

    /// Ticks since the last global epoch.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance the global counter. Returns `true` when an epoch should close,
    /// in which case the counter restarts.
    pub fn tick(&mut self, max_speed: f64) -> bool {
        self.ticks += 1;
        if self.ticks >= self.horizon && max_speed < self.velocity_horizon {
            self.ticks = 0;
            true
        } else {
            false
        }
    }

    /// Advance the counter of a single agent.
    pub fn tick_agent(&mut self, agent: usize, speed: f64) -> Result<bool> {
        let agents = self.agent_ticks.len();
        let ticks = self
            .agent_ticks
            .get_mut(agent)
            .ok_or(Error::AgentOutOfRange { agent, agents })?;
        *ticks += 1;
        if *ticks >= self.horizon && speed < self.velocity_horizon {
            *ticks = 0;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
        self.agent_ticks.iter_mut().for_each(|ticks| *ticks = 0);
    }
}

/// Largest speed among `velocities`, zero for an empty swarm.
pub fn max_speed(velocities: &[Point3]) -> f64 {
    velocities.iter().map(norm).fold(0.0, f64::max)
}
