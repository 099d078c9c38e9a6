//! Snapshot repository that writes on a dedicated thread.
//!
//! Flushing the full history is blocking I/O. Wrapping a repository in
//! [`BackgroundSnapshotRepository`] moves that work off the control loop:
//! `save` only enqueues the document.

use std::{
    sync::{
        Arc, Mutex,
        mpsc::{self, Sender},
    },
    thread::{self, JoinHandle},
};

use tracing::warn;

use crate::{Result, error::Error, ports::SnapshotRepository, q_learning::SnapshotDocument};

/// Shared record of writes the worker thread could not complete.
///
/// Clones share the same log, so a handle taken before the repository is
/// handed to a learner still sees failures after the learner is dropped.
#[derive(Debug, Clone, Default)]
pub struct WriteFailures {
    messages: Arc<Mutex<Vec<String>>>,
}

impl WriteFailures {
    fn push(&self, message: String) {
        self.messages.lock().unwrap().push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Failures recorded since the last call.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock().unwrap())
    }
}

/// Asynchronous writer around another [`SnapshotRepository`].
///
/// `save` succeeds once the document is queued. Write failures on the worker
/// thread are logged and collected in [`WriteFailures`]; read them through
/// [`failures`](Self::failures), [`take_failures`](Self::take_failures) or
/// [`finish`](Self::finish). Dropping the repository drains the queue before
/// returning.
pub struct BackgroundSnapshotRepository {
    sender: Option<Sender<SnapshotDocument>>,
    worker: Option<JoinHandle<()>>,
    failures: WriteFailures,
}

impl BackgroundSnapshotRepository {
    /// Spawn a worker that forwards every document to `inner`.
    pub fn spawn<R>(inner: R) -> Result<Self>
    where
        R: SnapshotRepository + 'static,
    {
        let (sender, receiver) = mpsc::channel::<SnapshotDocument>();
        let failures = WriteFailures::default();
        let worker_failures = failures.clone();

        let worker = thread::Builder::new()
            .name("snapshot-writer".to_string())
            .spawn(move || {
                for document in receiver {
                    let entries = document.len();
                    if let Err(error) = inner.save(document) {
                        warn!(entries, %error, "background snapshot write failed");
                        worker_failures.push(error.to_string());
                    }
                }
            })
            .map_err(|source| Error::Io {
                operation: "spawn snapshot writer thread".to_string(),
                source,
            })?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
            failures,
        })
    }

    /// Handle on the failure log that outlives the repository.
    pub fn failures(&self) -> WriteFailures {
        self.failures.clone()
    }

    /// Failures recorded since the last call.
    pub fn take_failures(&self) -> Vec<String> {
        self.failures.take()
    }

    /// Wait for queued writes to finish and return every failure.
    pub fn finish(mut self) -> Vec<String> {
        self.shutdown();
        self.take_failures()
    }

    fn shutdown(&mut self) {
        self.sender.take();
        let Some(worker) = self.worker.take() else {
            return;
        };
        if worker.join().is_err() {
            self.failures
                .push("snapshot writer thread panicked".to_string());
        }
    }
}

impl SnapshotRepository for BackgroundSnapshotRepository {
    fn save(&self, document: SnapshotDocument) -> Result<()> {
        let sender = self.sender.as_ref().ok_or_else(|| Error::SnapshotWriter {
            message: "writer already shut down".to_string(),
        })?;
        sender.send(document).map_err(|_| Error::SnapshotWriter {
            message: "writer thread has exited".to_string(),
        })
    }
}

impl Drop for BackgroundSnapshotRepository {
    fn drop(&mut self) {
        self.shutdown();
    }
}
