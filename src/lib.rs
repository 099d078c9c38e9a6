//! Pairwise tabular Q-learning of flocking lattice spacing
//!
//! This crate provides:
//! - A dense value store of spacing estimates for every ordered agent pair
//! - Epsilon-greedy selection over a discrete set of spacing options
//! - A landmark-distance reward and the reciprocal bootstrap update
//! - Binding of selected spacings into a controller's spacing matrix
//! - Bounded snapshot history with pluggable persistence
//! - A demonstration swarm and CLI for running and inspecting the learner
//!
//! ```
//! use lattice_q::{LearnerConfig, PairScope, q_learning::PairwiseLearner};
//!
//! let mut learner = PairwiseLearner::new(LearnerConfig::new(3).with_seed(1))?;
//! let agents = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
//! let landmarks = [[0.0, 0.0, 2.0]];
//! learner.compute_reward(&agents, &landmarks);
//! let report = learner.update(PairScope::All)?;
//! assert_eq!(report.pairs_updated, 6);
//! # Ok::<(), lattice_q::Error>(())
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod identifiers;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use config::{LearnerConfig, OptionRange};
pub use error::{Error, Result};
pub use types::{Pair, PairScope, Point3};
