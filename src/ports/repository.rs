//! Repository ports for snapshot history and learner checkpoints.

use std::path::Path;

use crate::{
    Result,
    q_learning::{SavedLearner, SnapshotDocument},
};

/// Port for flushing accumulated Q-table history to durable storage.
///
/// The document is handed over by value so that implementations may move it
/// to another thread without copying the history.
///
/// # Examples
///
/// ```no_run
/// use lattice_q::adapters::JsonSnapshotRepository;
/// use lattice_q::q_learning::PairwiseLearner;
/// use lattice_q::LearnerConfig;
///
/// let learner = PairwiseLearner::new(LearnerConfig::new(5))?
///     .with_repository(Box::new(JsonSnapshotRepository::new("Data/data_Q.json")));
/// # Ok::<(), lattice_q::Error>(())
/// ```
pub trait SnapshotRepository: Send {
    /// Persist `document`, replacing whatever the previous flush wrote.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized or written.
    /// The learner reports the failure and carries on.
    fn save(&self, document: SnapshotDocument) -> Result<()>;
}

/// Port for saving and restoring a complete learner.
pub trait LearnerRepository {
    /// Save a learner checkpoint to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path cannot be created or written to
    /// - Serialization fails
    fn save(&self, learner: &SavedLearner, path: &Path) -> Result<()>;

    /// Load a learner checkpoint from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or corrupted.
    fn load(&self, path: &Path) -> Result<SavedLearner>;
}
