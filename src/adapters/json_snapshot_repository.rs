//! JSON implementation of the snapshot repository.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    Result,
    error::Error,
    ports::SnapshotRepository,
    q_learning::SnapshotDocument,
};

/// Writes each flushed history to a single JSON file, overwriting the
/// previous flush.
///
/// # Examples
///
/// ```no_run
/// use lattice_q::adapters::JsonSnapshotRepository;
/// use lattice_q::ports::SnapshotRepository;
/// use lattice_q::q_learning::SnapshotDocument;
///
/// let repo = JsonSnapshotRepository::new("Data/data_Q.json");
/// repo.save(SnapshotDocument::new())?;
/// # Ok::<(), lattice_q::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonSnapshotRepository {
    path: PathBuf,
    pretty: bool,
}

impl JsonSnapshotRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: false,
        }
    }

    /// Indent the output for reading by eye.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back the most recently flushed document.
    pub fn load(&self) -> Result<SnapshotDocument> {
        load_document(&self.path)
    }
}

/// Read a snapshot document from a JSON file.
pub fn load_document(path: &Path) -> Result<SnapshotDocument> {
    let file = File::open(path).map_err(|source| Error::Io {
        operation: format!("open snapshot {path:?}"),
        source,
    })?;
    SnapshotDocument::from_reader(std::io::BufReader::new(file))
}

impl SnapshotRepository for JsonSnapshotRepository {
    fn save(&self, document: SnapshotDocument) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                operation: format!("create snapshot directory {parent:?}"),
                source,
            })?;
        }
        let file = File::create(&self.path).map_err(|source| Error::Io {
            operation: format!("create snapshot {:?}", self.path),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        document.to_writer(&mut writer, self.pretty)?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush snapshot {:?}", self.path),
            source,
        })?;
        Ok(())
    }
}
