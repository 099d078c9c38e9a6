//! In-memory snapshot repository for testing.
//!
//! Keeps every flushed document in a shared vector so tests can inspect what
//! the learner persisted without touching the file system.

use std::sync::{Arc, Mutex};

use crate::{Result, error::Error, ports::SnapshotRepository, q_learning::SnapshotDocument};

/// In-memory repository for testing.
///
/// All clones share the same underlying storage, so a test can keep one
/// handle while the learner owns another.
///
/// # Examples
///
/// ```
/// use lattice_q::adapters::InMemorySnapshotRepository;
/// use lattice_q::ports::SnapshotRepository;
/// use lattice_q::q_learning::SnapshotDocument;
///
/// let repo = InMemorySnapshotRepository::new();
/// repo.save(SnapshotDocument::new())?;
/// assert_eq!(repo.count(), 1);
/// # Ok::<(), lattice_q::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemorySnapshotRepository {
    storage: Arc<Mutex<Vec<SnapshotDocument>>>,
    fail_writes: bool,
}

impl InMemorySnapshotRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository whose every write fails, for exercising error paths.
    pub fn failing() -> Self {
        Self {
            storage: Arc::default(),
            fail_writes: true,
        }
    }

    /// Number of flushes received.
    pub fn count(&self) -> usize {
        self.storage.lock().unwrap().len()
    }

    /// Copies of every document received, in flush order.
    pub fn saved(&self) -> Vec<SnapshotDocument> {
        self.storage.lock().unwrap().clone()
    }

    /// Most recent document, if any.
    pub fn last(&self) -> Option<SnapshotDocument> {
        self.storage.lock().unwrap().last().cloned()
    }

    pub fn clear(&self) {
        self.storage.lock().unwrap().clear();
    }
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn save(&self, document: SnapshotDocument) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Io {
                operation: "write snapshot to in-memory storage".to_string(),
                source: std::io::Error::other("simulated write failure"),
            });
        }
        self.storage.lock().unwrap().push(document);
        Ok(())
    }
}
