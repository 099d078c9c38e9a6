//! CLI infrastructure for the lattice-q toolkit
//!
//! This module provides the command-line interface for running the
//! demonstration swarm and inspecting persisted Q-table snapshots.

pub mod commands;
pub mod config;
pub mod output;
