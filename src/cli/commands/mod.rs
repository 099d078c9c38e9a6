//! Subcommands of the `lattice-q` binary

pub mod inspect;
pub mod simulate;
