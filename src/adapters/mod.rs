//! Adapters implementing domain ports.
//!
//! This module contains infrastructure implementations of the traits defined
//! in the ports module. Following hexagonal architecture, adapters depend on
//! domain ports, not the other way around.

pub mod background_repository;
pub mod in_memory_repository;
pub mod json_snapshot_repository;
pub mod lattice;
pub mod msgpack_repository;

pub use background_repository::{BackgroundSnapshotRepository, WriteFailures};
pub use in_memory_repository::InMemorySnapshotRepository;
pub use json_snapshot_repository::JsonSnapshotRepository;
pub use lattice::LatticeMatrix;
pub use msgpack_repository::MsgPackLearnerRepository;
