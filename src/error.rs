//! Error types for the lattice-q crate

use thiserror::Error;

/// Main error type for the lattice-q crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("agent {agent} cannot be paired with itself")]
    SelfPair { agent: usize },

    #[error("agent {agent} is out of range (swarm has {agents} agents)")]
    AgentOutOfRange { agent: usize, agents: usize },

    #[error("option index {index} is out of range (agent has {options} options)")]
    OptionOutOfRange { index: usize, options: usize },

    #[error("value {value} is not in the option set of agent {agent}")]
    UnknownOption { agent: usize, value: f64 },

    #[error(
        "mis-match in dimensions of controller and learner parameters: expected {expected}, got {actual}"
    )]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid label '{label}' (expected format: '{expected}')")]
    InvalidLabelFormat { label: String, expected: String },

    #[error("unsupported save format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("snapshot writer unavailable: {message}")]
    SnapshotWriter { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}
