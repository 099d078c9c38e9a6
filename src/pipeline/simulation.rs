//! Demonstration swarm driving the learner.
//!
//! Point-mass agents follow a spring lattice whose rest lengths come from the
//! learner's spacing matrix, with a weak pull toward the landmark centroid and
//! linear damping. The physics is deliberately simple; it exists to exercise
//! the decision-epoch cycle end to end.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    Error, Result,
    adapters::LatticeMatrix,
    ports::{EpochObserver, SpacingMatrix},
    q_learning::{DecisionClock, PairwiseLearner, Persistence, max_speed},
    types::{PairScope, Point3, distance, norm},
};

/// How epochs are triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpochMode {
    /// One clock for the whole swarm; every pair updates together.
    #[default]
    Global,
    /// One clock per agent; only that agent's pairs update.
    Local,
}

/// Simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub steps: u64,
    /// Integration step [s]
    pub sample_time: f64,
    pub landmarks: usize,
    /// Half-width of the cube agents and landmarks are scattered in
    pub arena: f64,
    pub lattice_gain: f64,
    pub navigation_gain: f64,
    pub damping: f64,
    pub max_acceleration: f64,
    pub mode: EpochMode,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: 20_000,
            sample_time: 0.02,
            landmarks: 3,
            arena: 10.0,
            lattice_gain: 1.0,
            navigation_gain: 0.05,
            damping: 2.0,
            max_acceleration: 10.0,
            mode: EpochMode::Global,
            seed: None,
        }
    }
}

/// Result of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub steps: u64,
    pub epochs: u64,
    pub final_reward: f64,
    pub mean_reward: f64,
    pub flushes: usize,
    pub failed_flushes: usize,
}

impl SimulationSummary {
    /// Reclassify flushes that were accepted by a queue but failed to write.
    pub fn record_failed_writes(&mut self, failed: usize) {
        let moved = failed.min(self.flushes);
        self.flushes -= moved;
        self.failed_flushes += failed;
    }
}

/// Positions and velocities of the swarm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwarmState {
    pub positions: Vec<Point3>,
    pub velocities: Vec<Point3>,
}

impl SwarmState {
    fn scatter(agents: usize, arena: f64, rng: &mut StdRng) -> Self {
        Self {
            positions: (0..agents).map(|_| random_point(arena, rng)).collect(),
            velocities: vec![[0.0; 3]; agents],
        }
    }
}

fn random_point(arena: f64, rng: &mut StdRng) -> Point3 {
    [
        rng.random_range(-arena..=arena),
        rng.random_range(-arena..=arena),
        rng.random_range(-arena..=arena),
    ]
}

/// Swarm, landmarks and controller matrix for one run.
pub struct SwarmSimulation {
    config: SimulationConfig,
    state: SwarmState,
    landmarks: Vec<Point3>,
    lattice: LatticeMatrix,
    clock: DecisionClock,
    observers: Vec<Box<dyn EpochObserver>>,
}

impl SwarmSimulation {
    /// Scatter agents and landmarks for `learner`'s swarm.
    pub fn new(config: SimulationConfig, learner: &PairwiseLearner) -> Result<Self> {
        if !(config.sample_time.is_finite() && config.sample_time > 0.0) {
            return Err(Error::invalid_config(format!(
                "sample_time must be positive, got {}",
                config.sample_time
            )));
        }
        let agents = learner.config().agents;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let state = SwarmState::scatter(agents, config.arena, &mut rng);
        let landmarks = (0..config.landmarks)
            .map(|_| random_point(config.arena, &mut rng))
            .collect();
        let range = learner.config().option_range;
        Ok(Self {
            lattice: LatticeMatrix::filled(agents, (range.lo + range.hi) / 2.0),
            clock: DecisionClock::from_config(learner.config()),
            state,
            landmarks,
            config,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the run
    pub fn with_observer(mut self, observer: Box<dyn EpochObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn state(&self) -> &SwarmState {
        &self.state
    }

    pub fn landmarks(&self) -> &[Point3] {
        &self.landmarks
    }

    pub fn lattice(&self) -> &LatticeMatrix {
        &self.lattice
    }

    fn acceleration(&self, agent: usize) -> Point3 {
        let position = self.state.positions[agent];
        let velocity = self.state.velocities[agent];
        let mut accel = [0.0; 3];

        for (neighbour, other) in self.state.positions.iter().enumerate() {
            if neighbour == agent {
                continue;
            }
            let gap = distance(&position, other);
            if gap < 1e-9 {
                continue;
            }
            let pull = self.config.lattice_gain * (gap - self.lattice.spacing(agent, neighbour));
            for axis in 0..3 {
                accel[axis] += pull * (other[axis] - position[axis]) / gap;
            }
        }

        if !self.landmarks.is_empty() {
            let count = self.landmarks.len() as f64;
            for axis in 0..3 {
                let centroid = self.landmarks.iter().map(|l| l[axis]).sum::<f64>() / count;
                accel[axis] += self.config.navigation_gain * (centroid - position[axis]);
            }
        }

        for axis in 0..3 {
            accel[axis] -= self.config.damping * velocity[axis];
        }

        let magnitude = norm(&accel);
        if magnitude > self.config.max_acceleration {
            let scale = self.config.max_acceleration / magnitude;
            accel.iter_mut().for_each(|a| *a *= scale);
        }
        accel
    }

    fn integrate(&mut self) {
        let dt = self.config.sample_time;
        let accelerations: Vec<Point3> = (0..self.state.positions.len())
            .map(|agent| self.acceleration(agent))
            .collect();
        for (agent, accel) in accelerations.iter().enumerate() {
            let velocity = &mut self.state.velocities[agent];
            for axis in 0..3 {
                velocity[axis] += accel[axis] * dt;
            }
            let velocity = *velocity;
            let position = &mut self.state.positions[agent];
            for axis in 0..3 {
                position[axis] += velocity[axis] * dt;
            }
        }
    }

    fn notify<F>(&mut self, mut event: F) -> Result<()>
    where
        F: FnMut(&mut dyn EpochObserver) -> Result<()>,
    {
        for observer in &mut self.observers {
            event(observer.as_mut())?;
        }
        Ok(())
    }

    /// Run the configured number of steps.
    ///
    /// The learner's current actions are bound before the first step. Any
    /// history left in the buffer is flushed when the run ends.
    pub fn run(&mut self, learner: &mut PairwiseLearner) -> Result<SimulationSummary> {
        learner.bind_parameters(PairScope::All, &mut self.lattice)?;
        let total_steps = self.config.steps;
        self.notify(|o| o.on_run_start(total_steps))?;

        let mut epochs = 0;
        let mut reward_sum = 0.0;
        let mut flushes = 0;
        let mut failed_flushes = 0;
        let mut tally = |persistence: &Persistence| match persistence {
            Persistence::Flushed { .. } => flushes += 1,
            Persistence::Failed { .. } => failed_flushes += 1,
            Persistence::Buffered | Persistence::Discarded { .. } => {}
        };

        for step in 1..=total_steps {
            self.integrate();

            let mut reports = Vec::new();
            match self.config.mode {
                EpochMode::Global => {
                    if self.clock.tick(max_speed(&self.state.velocities)) {
                        reports.push(learner.run_epoch(
                            PairScope::All,
                            &self.state.positions,
                            &self.landmarks,
                            &mut self.lattice,
                        )?);
                    }
                }
                EpochMode::Local => {
                    for agent in 0..self.state.positions.len() {
                        let speed = norm(&self.state.velocities[agent]);
                        if self.clock.tick_agent(agent, speed)? {
                            reports.push(learner.run_epoch(
                                PairScope::Agent(agent),
                                &self.state.positions[agent..=agent],
                                &self.landmarks,
                                &mut self.lattice,
                            )?);
                        }
                    }
                }
            }

            for report in &reports {
                epochs += 1;
                reward_sum += report.reward;
                tally(&report.update.persistence);
                self.notify(|o| o.on_epoch(step, report))?;
            }
            self.notify(|o| o.on_step(step))?;
        }

        tally(&learner.flush());
        self.notify(|o| o.on_run_end())?;

        let summary = SimulationSummary {
            steps: total_steps,
            epochs,
            final_reward: learner.reward(),
            mean_reward: if epochs > 0 {
                reward_sum / epochs as f64
            } else {
                0.0
            },
            flushes,
            failed_flushes,
        };
        info!(
            epochs = summary.epochs,
            mean_reward = summary.mean_reward,
            flushes = summary.flushes,
            "simulation finished"
        );
        Ok(summary)
    }
}
