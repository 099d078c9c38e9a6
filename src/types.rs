//! Shared value types for the pairwise learner.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A position (or velocity) in three-dimensional space.
pub type Point3 = [f64; 3];

/// Euclidean distance between two points.
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Euclidean norm of a vector.
pub fn norm(v: &Point3) -> f64 {
    distance(v, &[0.0; 3])
}

/// An ordered agent pair `(source, neighbour)` with `source != neighbour`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pair {
    source: usize,
    neighbour: usize,
}

impl Pair {
    /// Create a pair, rejecting self-pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SelfPair`] when `source == neighbour`.
    pub fn new(source: usize, neighbour: usize) -> Result<Self> {
        if source == neighbour {
            return Err(Error::SelfPair { agent: source });
        }
        Ok(Self { source, neighbour })
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn neighbour(&self) -> usize {
        self.neighbour
    }

    /// The mirror pair `(neighbour, source)`.
    pub fn reciprocal(&self) -> Self {
        Self {
            source: self.neighbour,
            neighbour: self.source,
        }
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.source, self.neighbour)
    }
}

/// Which ordered pairs an operation touches.
///
/// `All` is the synchronous swarm-wide mode; `Agent(i)` restricts the
/// operation to agent `i`'s outgoing pairs for decentralized triggering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairScope {
    #[default]
    All,
    Agent(usize),
}

impl PairScope {
    /// Enumerate the ordered pairs covered by this scope in a swarm of
    /// `agents` agents, source-major then neighbour ascending.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AgentOutOfRange`] if a local scope names an agent
    /// outside the swarm.
    pub fn pairs(self, agents: usize) -> Result<impl Iterator<Item = Pair>> {
        let sources = match self {
            PairScope::All => 0..agents,
            PairScope::Agent(agent) if agent < agents => agent..agent + 1,
            PairScope::Agent(agent) => return Err(Error::AgentOutOfRange { agent, agents }),
        };
        Ok(sources.flat_map(move |source| {
            (0..agents)
                .filter(move |&neighbour| neighbour != source)
                .map(move |neighbour| Pair { source, neighbour })
        }))
    }
}

impl fmt::Display for PairScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairScope::All => write!(f, "all"),
            PairScope::Agent(agent) => write!(f, "agent {agent}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_rejects_self() {
        assert!(matches!(Pair::new(2, 2), Err(Error::SelfPair { agent: 2 })));
        let pair = Pair::new(0, 1).unwrap();
        assert_eq!(pair.reciprocal(), Pair::new(1, 0).unwrap());
    }

    #[test]
    fn test_scope_all_enumerates_every_ordered_pair() {
        let pairs: Vec<Pair> = PairScope::All.pairs(3).unwrap().collect();
        assert_eq!(pairs.len(), 6);
        assert!(pairs.iter().all(|p| p.source() != p.neighbour()));
        assert_eq!(pairs[0], Pair::new(0, 1).unwrap());
        assert_eq!(pairs[5], Pair::new(2, 1).unwrap());
    }

    #[test]
    fn test_scope_agent_enumerates_outgoing_pairs() {
        let pairs: Vec<Pair> = PairScope::Agent(1).pairs(4).unwrap().collect();
        assert_eq!(
            pairs,
            vec![
                Pair::new(1, 0).unwrap(),
                Pair::new(1, 2).unwrap(),
                Pair::new(1, 3).unwrap()
            ]
        );
        assert!(PairScope::Agent(4).pairs(4).is_err());
    }

    #[test]
    fn test_distance() {
        assert!((distance(&[0.0, 0.0, 0.0], &[3.0, 4.0, 0.0]) - 5.0).abs() < 1e-12);
        assert!((norm(&[1.0, 2.0, 2.0]) - 3.0).abs() < 1e-12);
    }
}
