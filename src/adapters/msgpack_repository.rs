//! MessagePack implementation of the learner repository.
//!
//! This adapter implements the LearnerRepository port using rmp_serde for
//! compact binary checkpoints.

use std::{fs::File, path::Path};

use crate::{Result, error::Error, ports::LearnerRepository, q_learning::SavedLearner};

/// MessagePack-based learner checkpoints.
///
/// # Examples
///
/// ```no_run
/// use lattice_q::adapters::MsgPackLearnerRepository;
/// use lattice_q::ports::LearnerRepository;
/// use lattice_q::{LearnerConfig, q_learning::PairwiseLearner};
/// use std::path::Path;
///
/// let repo = MsgPackLearnerRepository;
/// let learner = PairwiseLearner::new(LearnerConfig::new(5))?;
///
/// repo.save(&learner.to_saved(), Path::new("learner.msgpack"))?;
/// let restored = PairwiseLearner::from_saved(repo.load(Path::new("learner.msgpack"))?)?;
/// # Ok::<(), lattice_q::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackLearnerRepository;

impl MsgPackLearnerRepository {
    pub fn new() -> Self {
        Self
    }
}

impl LearnerRepository for MsgPackLearnerRepository {
    fn save(&self, learner: &SavedLearner, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        rmp_serde::encode::write(&mut file, learner).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize learner to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedLearner> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
            operation: "deserialize learner from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{LearnerConfig, PairScope, q_learning::PairwiseLearner};

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("learner.msgpack");

        let mut learner =
            PairwiseLearner::new(LearnerConfig::new(4).with_seed(21)).expect("valid config");
        learner.compute_reward(&[[0.0; 3], [1.0, 1.0, 1.0]], &[[2.0, 0.0, 0.0]]);
        learner.update(PairScope::All).unwrap();

        let repo = MsgPackLearnerRepository::new();
        repo.save(&learner.to_saved(), &file_path)
            .expect("Failed to save");
        let restored =
            PairwiseLearner::from_saved(repo.load(&file_path).expect("Failed to load")).unwrap();

        assert_eq!(restored.q_table(), learner.q_table());
        assert_eq!(restored.config(), learner.config());
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = MsgPackLearnerRepository::new();
        let result = repo.load(Path::new("/tmp/nonexistent_12345.msgpack"));
        assert!(result.is_err());
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let repo = MsgPackLearnerRepository::new();
        let learner = PairwiseLearner::new(LearnerConfig::new(2)).unwrap();
        let result = repo.save(
            &learner.to_saved(),
            Path::new("/invalid_dir_12345/learner.msgpack"),
        );
        assert!(result.is_err());
    }
}
