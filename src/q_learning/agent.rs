//! Pairwise Q-learning agent
//!
//! Every ordered agent pair keeps its own row of option estimates. One swarm
//! reward is shared by all pairs, and each pair bootstraps from its mirror
//! pair's estimate of the same option.

use std::fmt;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    Error, LearnerConfig, Result,
    ports::{SnapshotRepository, SpacingMatrix},
    q_learning::{
        history::HistoryBuffer,
        options::ActionSpace,
        policy::{ActionSelector, ActionTable, SelectionMode},
        q_table::QTable,
        reward::landmark_reward,
        serialization::{SavedLearner, SnapshotDocument},
    },
    types::{Pair, PairScope, Point3},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LearnerState {
    pub config: LearnerConfig,
    pub q_table: QTable,
    pub actions: ActionTable,
    pub explore_rate: f64,
    pub reward: f64,
    pub update_count: u64,
    pub agent_update_counts: Vec<u64>,
    #[serde(default)]
    pub sweeps: u64,
}

/// Seeded generators are offset by the number of sweeps already performed.
fn build_rng(seed: Option<u64>, sweeps: u64) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed ^ sweeps.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// What happened to the history buffer after an update sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Persistence {
    /// Threshold not yet exceeded; snapshot kept in memory.
    Buffered,
    /// History written to the repository.
    Flushed { entries: usize },
    /// Threshold exceeded with no repository attached; history dropped.
    Discarded { entries: usize },
    /// The repository rejected the write. History was dropped regardless.
    Failed { entries: usize, message: String },
}

/// Outcome of one Update Rule sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateReport {
    /// History key assigned to this sweep
    pub update_count: u64,
    /// Number of pair entries revised
    pub pairs_updated: usize,
    pub persistence: Persistence,
}

/// Outcome of a complete decision epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochReport {
    pub scope: PairScope,
    pub reward: f64,
    pub update: UpdateReport,
    pub mode: SelectionMode,
}

/// Decentralized pairwise learner for lattice spacing.
///
/// # Examples
///
/// ```
/// use lattice_q::{LearnerConfig, PairScope, adapters::LatticeMatrix, q_learning::PairwiseLearner};
///
/// let mut learner = PairwiseLearner::new(LearnerConfig::new(3).with_seed(7))?;
/// let mut lattice = LatticeMatrix::filled(3, 5.0);
/// learner.bind_parameters(PairScope::All, &mut lattice)?;
///
/// let agents = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
/// let landmarks = [[5.0, 5.0, 0.0]];
/// let report = learner.run_epoch(PairScope::All, &agents, &landmarks, &mut lattice)?;
/// assert!(report.reward > 0.0);
/// # Ok::<(), lattice_q::Error>(())
/// ```
pub struct PairwiseLearner {
    config: LearnerConfig,
    space: ActionSpace,
    q_table: QTable,
    actions: ActionTable,
    selector: ActionSelector,
    rng: StdRng,
    reward: f64,
    update_count: u64,
    agent_update_counts: Vec<u64>,
    sweeps: u64,
    history: HistoryBuffer,
    repository: Option<Box<dyn SnapshotRepository>>,
}

impl fmt::Debug for PairwiseLearner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairwiseLearner")
            .field("agents", &self.config.agents)
            .field("options", &self.space.options())
            .field("reward", &self.reward)
            .field("update_count", &self.update_count)
            .field("buffered", &self.history.len())
            .field("repository", &self.repository.is_some())
            .finish()
    }
}

impl PairwiseLearner {
    /// Create a learner with a zeroed Q-table and an initial action draw.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` fails validation.
    pub fn new(config: LearnerConfig) -> Result<Self> {
        let space = ActionSpace::from_config(&config)?;
        let agents = config.agents;
        let mut learner = Self {
            q_table: QTable::new(agents, space.options()),
            actions: ActionTable::new(agents),
            selector: ActionSelector::new(config.explore_rate),
            rng: build_rng(config.seed, 0),
            reward: 0.0,
            update_count: 0,
            agent_update_counts: vec![0; agents],
            sweeps: 0,
            history: HistoryBuffer::with_capacity(Self::history_capacity(&config)),
            repository: None,
            space,
            config,
        };
        learner.select_actions(PairScope::All)?;
        Ok(learner)
    }

    /// Attach a repository that receives the history on every flush.
    pub fn with_repository(mut self, repository: Box<dyn SnapshotRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Replace the tuning parameters of a live or restored learner.
    ///
    /// Exploration, learning rate, discount, timing and persistence settings
    /// take effect immediately; buffered snapshots are kept. The new config
    /// must describe the same swarm and option layout as the table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` is invalid or its
    /// option layout differs from the learner's.
    pub fn reconfigure(&mut self, config: LearnerConfig) -> Result<()> {
        let space = ActionSpace::from_config(&config)?;
        if space != self.space {
            return Err(Error::invalid_config(format!(
                "option layout of {} agents × {} options does not match the learner's {} × {}",
                space.agents(),
                space.options(),
                self.space.agents(),
                self.space.options()
            )));
        }
        self.selector.set_explore_rate(config.explore_rate);
        if config.seed != self.config.seed {
            self.rng = build_rng(config.seed, self.sweeps);
        }
        let mut history = HistoryBuffer::with_capacity(Self::history_capacity(&config));
        for (key, table) in self.history.drain() {
            history.push(key, table);
        }
        self.history = history;
        self.config = config;
        Ok(())
    }

    fn history_capacity(config: &LearnerConfig) -> usize {
        // a local-mode flush holds threshold × n + 1 entries
        let entries = config
            .persist_threshold
            .saturating_mul(config.agents as u64)
            .saturating_add(1);
        usize::try_from(entries).unwrap_or(usize::MAX)
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    pub fn action_space(&self) -> &ActionSpace {
        &self.space
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Direct table access for seeding estimates. Learning itself only
    /// mutates the table through [`PairwiseLearner::update`].
    pub fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    /// Most recent reward.
    pub fn reward(&self) -> f64 {
        self.reward
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Sweeps performed since the learner was created. Unlike
    /// [`update_count`](Self::update_count) this never resets on flush.
    pub fn sweeps(&self) -> u64 {
        self.sweeps
    }

    /// Number of local sweeps performed for `agent`.
    pub fn agent_update_count(&self, agent: usize) -> Result<u64> {
        self.agent_update_counts
            .get(agent)
            .copied()
            .ok_or(Error::AgentOutOfRange {
                agent,
                agents: self.config.agents,
            })
    }

    /// Number of snapshots waiting for the next flush.
    pub fn buffered_snapshots(&self) -> usize {
        self.history.len()
    }

    pub fn explore_rate(&self) -> f64 {
        self.selector.explore_rate()
    }

    /// Change the exploration probability, clamped to `[0, 1]`.
    pub fn set_explore_rate(&mut self, explore_rate: f64) {
        self.selector.set_explore_rate(explore_rate);
    }

    /// Option value currently held by `(source, neighbour)`.
    pub fn action_value(&self, source: usize, neighbour: usize) -> Result<f64> {
        let pair = Pair::new(source, neighbour)?;
        self.actions.value(pair, &self.space)
    }

    /// Estimate held by `(source, neighbour)` for the option with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOption`] if `value` is not one of `source`'s options.
    pub fn estimate(&self, source: usize, neighbour: usize, value: f64) -> Result<f64> {
        let option = self.space.index_of(source, value)?;
        self.q_table.get(source, neighbour, option)
    }

    /// Redraw actions for every pair in `scope` (SELECT).
    pub fn select_actions(&mut self, scope: PairScope) -> Result<SelectionMode> {
        let mode = self.selector.select(
            scope,
            &self.q_table,
            &self.space,
            &mut self.actions,
            &mut self.rng,
        )?;
        debug!(%scope, ?mode, "selected actions");
        Ok(mode)
    }

    /// Compute and store the swarm reward from current positions (EVALUATE).
    pub fn compute_reward(&mut self, agents: &[Point3], landmarks: &[Point3]) -> f64 {
        self.reward = landmark_reward(agents, landmarks, self.config.reward_smoothing);
        self.reward
    }

    /// Apply the temporal-difference update to every pair in `scope` (UPDATE).
    ///
    /// For a pair `(i, j)` holding option `a`:
    ///
    /// `Q(i,j,a) ← (1 − α)·Q(i,j,a) + α·(r + γ·Q(j,i,a))`
    ///
    /// The bootstrap reads the mirror pair's estimate of the same option
    /// index rather than a max over next actions. Pairs are revised in place,
    /// source-major, so a later pair may bootstrap from an estimate already
    /// revised in this sweep.
    ///
    /// Afterwards the update counter advances, a copy of the table is
    /// buffered, and the history is flushed once the counter exceeds the
    /// persistence threshold. A failed flush is reported in the returned
    /// [`UpdateReport`]; it never fails the update itself.
    pub fn update(&mut self, scope: PairScope) -> Result<UpdateReport> {
        let alpha = self.config.learning_rate;
        let gamma = self.config.discount;
        let reward = self.reward;
        let mut pairs_updated = 0;

        for pair in scope.pairs(self.config.agents)? {
            let option = self.actions.get(pair)?;
            let current = self.q_table.get_pair(pair, option)?;
            // TODO: bootstrap from the agent's own next-state max once the neighbour coupling is settled
            let future = self.q_table.get_pair(pair.reciprocal(), option)?;
            let revised = (1.0 - alpha) * current + alpha * (reward + gamma * future);
            self.q_table.set_pair(pair, option, revised)?;
            pairs_updated += 1;
        }

        self.update_count += 1;
        self.sweeps += 1;
        let threshold = match scope {
            PairScope::All => self.config.persist_threshold,
            PairScope::Agent(agent) => {
                self.agent_update_counts[agent] += 1;
                self.config
                    .persist_threshold
                    .saturating_mul(self.config.agents as u64)
            }
        };

        let update_count = self.update_count;
        if let Some(evicted) = self.history.push(update_count, self.q_table.clone()) {
            warn!(evicted, "history buffer full, dropped oldest snapshot");
        }

        let persistence = if self.update_count > threshold {
            self.update_count = 0;
            self.flush()
        } else {
            Persistence::Buffered
        };

        Ok(UpdateReport {
            update_count,
            pairs_updated,
            persistence,
        })
    }

    /// Hand all buffered snapshots to the repository and clear the buffer.
    ///
    /// Also called on shutdown so the tail of a run is not lost.
    pub fn flush(&mut self) -> Persistence {
        let entries = self.history.len();
        if entries == 0 {
            return Persistence::Buffered;
        }
        let history = self.history.drain();

        let Some(repository) = self.repository.as_ref() else {
            debug!(entries, "no snapshot repository attached, discarding history");
            return Persistence::Discarded { entries };
        };

        let result = SnapshotDocument::from_history(history, &self.space)
            .and_then(|document| repository.save(document));
        match result {
            Ok(()) => {
                info!(entries, "flushed Q-table history");
                Persistence::Flushed { entries }
            }
            Err(error) => {
                warn!(entries, %error, "failed to flush Q-table history");
                Persistence::Failed {
                    entries,
                    message: error.to_string(),
                }
            }
        }
    }

    /// Copy active actions for `scope` into the controller's spacing matrix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] before writing anything if the
    /// matrix does not cover exactly this swarm.
    pub fn bind_parameters<M>(&self, scope: PairScope, matrix: &mut M) -> Result<()>
    where
        M: SpacingMatrix + ?Sized,
    {
        if matrix.dimension() != self.config.agents {
            return Err(Error::DimensionMismatch {
                expected: self.config.agents,
                actual: matrix.dimension(),
            });
        }
        let values = scope
            .pairs(self.config.agents)?
            .map(|pair| Ok((pair, self.actions.value(pair, &self.space)?)))
            .collect::<Result<Vec<_>>>()?;
        for (pair, value) in values {
            matrix.set_spacing(pair.source(), pair.neighbour(), value);
        }
        Ok(())
    }

    /// Close one decision epoch: EVALUATE → UPDATE → SELECT → bind.
    pub fn run_epoch<M>(
        &mut self,
        scope: PairScope,
        agents: &[Point3],
        landmarks: &[Point3],
        matrix: &mut M,
    ) -> Result<EpochReport>
    where
        M: SpacingMatrix + ?Sized,
    {
        if matrix.dimension() != self.config.agents {
            return Err(Error::DimensionMismatch {
                expected: self.config.agents,
                actual: matrix.dimension(),
            });
        }
        let reward = self.compute_reward(agents, landmarks);
        let update = self.update(scope)?;
        let mode = self.select_actions(scope)?;
        self.bind_parameters(scope, matrix)?;
        debug!(%scope, reward, update_count = update.update_count, "decision epoch complete");
        Ok(EpochReport {
            scope,
            reward,
            update,
            mode,
        })
    }

    /// Capture a checkpoint of the learned state.
    pub fn to_saved(&self) -> SavedLearner {
        SavedLearner::new(LearnerState {
            config: self.config.clone(),
            q_table: self.q_table.clone(),
            actions: self.actions.clone(),
            explore_rate: self.selector.explore_rate(),
            reward: self.reward,
            update_count: self.update_count,
            agent_update_counts: self.agent_update_counts.clone(),
            sweeps: self.sweeps,
        })
    }

    /// Restore a learner from a checkpoint. The history buffer starts empty.
    pub fn from_saved(saved: SavedLearner) -> Result<Self> {
        let state = saved.into_state()?;
        let space = ActionSpace::from_config(&state.config)?;
        let agents = state.config.agents;
        if state.q_table.agents() != agents
            || state.q_table.options() != space.options()
            || state.actions.agents() != agents
            || state.agent_update_counts.len() != agents
        {
            return Err(Error::DimensionMismatch {
                expected: agents,
                actual: state.q_table.agents(),
            });
        }
        Ok(Self {
            history: HistoryBuffer::with_capacity(Self::history_capacity(&state.config)),
            selector: ActionSelector::new(state.explore_rate),
            rng: build_rng(state.config.seed, state.sweeps),
            q_table: state.q_table,
            actions: state.actions,
            reward: state.reward,
            update_count: state.update_count,
            agent_update_counts: state.agent_update_counts,
            sweeps: state.sweeps,
            repository: None,
            space,
            config: state.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySnapshotRepository, LatticeMatrix};

    fn learner(agents: usize) -> PairwiseLearner {
        PairwiseLearner::new(LearnerConfig::new(agents).with_seed(11)).unwrap()
    }

    #[test]
    fn test_initial_actions_are_valid_options() {
        let learner = learner(4);
        for pair in PairScope::All.pairs(4).unwrap() {
            let value = learner
                .action_value(pair.source(), pair.neighbour())
                .unwrap();
            assert!([2.0, 5.0, 8.0].contains(&value));
        }
        assert!(learner.action_value(1, 1).is_err());
    }

    #[test]
    fn test_update_with_full_learning_rate_replaces_estimate() {
        let config = LearnerConfig::new(3)
            .with_learning_rate(1.0)
            .with_discount(0.5)
            .with_explore_rate(0.0)
            .with_seed(3);
        let mut learner = PairwiseLearner::new(config).unwrap();
        let pair = Pair::new(0, 1).unwrap();
        // every pair holds option 0 after the initial greedy draw
        learner.q_table_mut().set_pair(pair, 0, 42.0).unwrap();
        learner.q_table_mut().set_pair(pair.reciprocal(), 0, 3.0).unwrap();
        learner.reward = 0.5;

        learner.update(PairScope::Agent(0)).unwrap();
        assert_eq!(learner.q_table().get_pair(pair, 0).unwrap(), 0.5 + 0.5 * 3.0);
    }

    #[test]
    fn test_update_blends_with_learning_rate() {
        let config = LearnerConfig::new(2)
            .with_learning_rate(0.5)
            .with_discount(0.8)
            .with_explore_rate(0.0)
            .with_seed(3);
        let mut learner = PairwiseLearner::new(config).unwrap();
        learner.reward = 1.0;

        learner.update(PairScope::All).unwrap();
        // (0,1): 0.5·0 + 0.5·(1 + 0.8·0) = 0.5
        // (1,0): 0.5·0 + 0.5·(1 + 0.8·0.5) = 0.7
        assert!((learner.q_table().get(0, 1, 0).unwrap() - 0.5).abs() < 1e-12);
        assert!((learner.q_table().get(1, 0, 0).unwrap() - 0.7).abs() < 1e-12);
        assert_eq!(learner.q_table().get(0, 1, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_estimate_by_option_value() {
        let mut learner = learner(3);
        learner.q_table_mut().set(2, 0, 1, 0.25).unwrap();
        assert_eq!(learner.estimate(2, 0, 5.0).unwrap(), 0.25);
        assert_eq!(learner.estimate(2, 0, 8.0).unwrap(), 0.0);
        assert!(matches!(
            learner.estimate(2, 0, 4.0),
            Err(Error::UnknownOption { agent: 2, .. })
        ));
    }

    #[test]
    fn test_local_update_counts_per_agent() {
        let mut learner = learner(3);
        let report = learner.update(PairScope::Agent(2)).unwrap();
        assert_eq!(report.pairs_updated, 2);
        assert_eq!(report.update_count, 1);
        assert_eq!(learner.agent_update_count(2).unwrap(), 1);
        assert_eq!(learner.agent_update_count(0).unwrap(), 0);
        assert!(learner.update(PairScope::Agent(3)).is_err());
    }

    #[test]
    fn test_flush_without_repository_discards() {
        let mut learner =
            PairwiseLearner::new(LearnerConfig::new(2).with_persist_threshold(1)).unwrap();
        assert_eq!(
            learner.update(PairScope::All).unwrap().persistence,
            Persistence::Buffered
        );
        assert_eq!(
            learner.update(PairScope::All).unwrap().persistence,
            Persistence::Discarded { entries: 2 }
        );
        assert_eq!(learner.update_count(), 0);
        assert_eq!(learner.buffered_snapshots(), 0);
    }

    #[test]
    fn test_local_threshold_scales_with_agents() {
        let repository = InMemorySnapshotRepository::new();
        let mut learner = PairwiseLearner::new(LearnerConfig::new(3).with_persist_threshold(2))
            .unwrap()
            .with_repository(Box::new(repository.clone()));

        for _ in 0..6 {
            let report = learner.update(PairScope::Agent(0)).unwrap();
            assert_eq!(report.persistence, Persistence::Buffered);
        }
        let report = learner.update(PairScope::Agent(1)).unwrap();
        assert_eq!(report.persistence, Persistence::Flushed { entries: 7 });
        assert_eq!(repository.saved().len(), 1);
    }

    #[test]
    fn test_bind_parameters_writes_off_diagonal_only() {
        let learner = learner(3);
        let mut lattice = LatticeMatrix::filled(3, -1.0);
        learner.bind_parameters(PairScope::All, &mut lattice).unwrap();
        for source in 0..3 {
            for neighbour in 0..3 {
                let cell = lattice.spacing(source, neighbour);
                if source == neighbour {
                    assert_eq!(cell, -1.0);
                } else {
                    assert_eq!(cell, learner.action_value(source, neighbour).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_bind_parameters_dimension_mismatch_writes_nothing() {
        let learner = learner(3);
        let mut lattice = LatticeMatrix::filled(4, -1.0);
        let err = learner.bind_parameters(PairScope::All, &mut lattice).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                actual: 4
            }
        ));
        assert!(lattice.as_slice().iter().all(|&cell| cell == -1.0));
    }

    #[test]
    fn test_bind_parameters_local_scope() {
        let learner = learner(3);
        let mut lattice = LatticeMatrix::filled(3, -1.0);
        learner.bind_parameters(PairScope::Agent(1), &mut lattice).unwrap();
        assert_eq!(lattice.spacing(0, 1), -1.0);
        assert_eq!(lattice.spacing(1, 0), learner.action_value(1, 0).unwrap());
        assert_eq!(lattice.spacing(1, 2), learner.action_value(1, 2).unwrap());
    }

    #[test]
    fn test_saved_roundtrip_preserves_state() {
        let mut learner = learner(3);
        learner.compute_reward(&[[0.0; 3]], &[[1.0, 0.0, 0.0]]);
        learner.update(PairScope::All).unwrap();

        let bytes = learner.to_saved().to_bytes().unwrap();
        let restored = PairwiseLearner::from_saved(SavedLearner::from_bytes(&bytes).unwrap())
            .unwrap();
        assert_eq!(restored.q_table(), learner.q_table());
        assert_eq!(restored.actions(), learner.actions());
        assert_eq!(restored.update_count(), learner.update_count());
        assert_eq!(restored.reward(), learner.reward());
    }

    #[test]
    fn test_unbounded_persist_threshold_builds() {
        let config = LearnerConfig::new(5).with_persist_threshold(u64::MAX);
        let mut learner = PairwiseLearner::new(config).unwrap();
        learner.compute_reward(&[[0.0; 3]], &[[1.0, 0.0, 0.0]]);
        let report = learner.update(PairScope::All).unwrap();
        assert_eq!(report.persistence, Persistence::Buffered);
        assert_eq!(learner.buffered_snapshots(), 1);

        let restored = PairwiseLearner::from_saved(learner.to_saved()).unwrap();
        assert_eq!(restored.config().persist_threshold, u64::MAX);
    }

    #[test]
    fn test_degenerate_range_is_rejected() {
        let config = LearnerConfig::new(3).with_range(4.0, 4.0);
        assert!(matches!(
            PairwiseLearner::new(config),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_reconfigure_updates_tuning_and_keeps_history() {
        let mut learner = learner(3);
        learner.compute_reward(&[[0.0; 3]], &[[1.0, 0.0, 0.0]]);
        learner.update(PairScope::All).unwrap();

        let tuned = learner
            .config()
            .clone()
            .with_explore_rate(0.0)
            .with_persist_threshold(2)
            .with_time_horizon(40, 0.5);
        learner.reconfigure(tuned).unwrap();
        assert_eq!(learner.explore_rate(), 0.0);
        assert_eq!(learner.config().persist_threshold, 2);
        assert_eq!(learner.config().time_horizon, 40);
        assert_eq!(learner.buffered_snapshots(), 1);
        assert_eq!(
            learner.select_actions(PairScope::All).unwrap(),
            SelectionMode::Exploit
        );
    }

    #[test]
    fn test_reconfigure_rejects_other_layouts() {
        let mut learner = learner(3);
        let before = learner.config().clone();
        assert!(learner.reconfigure(LearnerConfig::new(4)).is_err());
        assert!(
            learner
                .reconfigure(before.clone().with_range(1.0, 9.0))
                .is_err()
        );
        assert!(learner.reconfigure(before.clone().with_options(4)).is_err());
        assert_eq!(learner.config(), &before);
    }

    #[test]
    fn test_restored_seeded_learner_draws_fresh_actions() {
        let config = LearnerConfig::new(4).with_explore_rate(1.0).with_seed(5);
        let mut learner = PairwiseLearner::new(config).unwrap();
        let first_draw = learner.actions().clone();
        for _ in 0..3 {
            learner.update(PairScope::All).unwrap();
        }
        assert_eq!(learner.sweeps(), 3);

        let mut restored = PairwiseLearner::from_saved(learner.to_saved()).unwrap();
        assert_eq!(restored.sweeps(), 3);
        restored.select_actions(PairScope::All).unwrap();
        assert_ne!(restored.actions(), &first_draw);
    }
}
