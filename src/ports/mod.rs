//! Ports (trait boundaries) for external collaborators.
//!
//! The learner owns these interfaces; adapters in [`crate::adapters`] and the
//! host simulation implement them.

pub mod controller;
pub mod observer;
pub mod repository;

pub use controller::SpacingMatrix;
pub use observer::EpochObserver;
pub use repository::{LearnerRepository, SnapshotRepository};
