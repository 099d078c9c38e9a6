//! Pairwise tabular Q-learning for lattice spacing
//!
//! Each agent learns, per neighbour, which spacing option to hold. All pairs
//! share one swarm-level reward: the reciprocal of the mean distance between
//! agents and landmarks.
//!
//! ## Decision epoch
//!
//! | Step | Operation | Method |
//! |------|-----------|--------|
//! | SELECT | ε-greedy option per pair | [`PairwiseLearner::select_actions`] |
//! | (hold) | controller flies the lattice | [`DecisionClock::tick`] |
//! | EVALUATE | landmark proximity reward | [`PairwiseLearner::compute_reward`] |
//! | UPDATE | TD update + conditional flush | [`PairwiseLearner::update`] |
//! | BIND | write spacing matrix | [`PairwiseLearner::bind_parameters`] |
//!
//! Every operation takes a [`PairScope`](crate::PairScope): `All` for a
//! synchronous swarm step, `Agent(i)` for decentralized per-agent triggering.
//!
//! ## Usage Example
//!
//! ```no_run
//! use lattice_q::{LearnerConfig, adapters::JsonSnapshotRepository, q_learning::PairwiseLearner};
//!
//! let learner = PairwiseLearner::new(
//!     LearnerConfig::new(5)
//!         .with_options(3)
//!         .with_range(2.0, 8.0)
//!         .with_learning_rate(0.5)
//!         .with_discount(0.8),
//! )?
//! .with_repository(Box::new(JsonSnapshotRepository::new("Data/data_Q.json")));
//! # Ok::<(), lattice_q::Error>(())
//! ```

pub mod agent;
pub mod history;
pub mod options;
pub mod policy;
pub mod q_table;
pub mod reward;
pub mod schedule;
pub mod serialization;

// Public re-exports
pub use agent::{EpochReport, PairwiseLearner, Persistence, UpdateReport};
pub use history::HistoryBuffer;
pub use options::{ActionSpace, OptionSet};
pub use policy::{ActionSelector, ActionTable, SelectionMode};
pub use q_table::QTable;
pub use reward::landmark_reward;
pub use schedule::{DecisionClock, max_speed};
pub use serialization::{SavedLearner, SnapshotDocument, TableSnapshot};
