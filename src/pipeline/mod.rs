//! Simulation pipeline
//!
//! This module provides:
//! - A demonstration swarm that drives the learner through decision epochs
//! - Observers recording what happened at each epoch

pub mod observers;
pub mod simulation;

pub use observers::{EpochObservation, JsonlObserver, ProgressObserver, RewardTrace};
pub use simulation::{EpochMode, SimulationConfig, SimulationSummary, SwarmSimulation, SwarmState};

pub use crate::ports::EpochObserver;
