//! Discretized spacing options per agent.

use serde::{Deserialize, Serialize};

use crate::{Error, LearnerConfig, Result, config::OptionRange};

/// Ordered candidate values for one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSet {
    values: Vec<f64>,
}

impl OptionSet {
    /// `count` values evenly spaced over `[range.lo, range.hi]`, both ends included.
    pub fn linspace(range: OptionRange, count: usize) -> Self {
        let values = match count {
            0 => Vec::new(),
            1 => vec![range.lo],
            _ => {
                let step = (range.hi - range.lo) / (count - 1) as f64;
                (0..count)
                    .map(|k| {
                        if k == count - 1 {
                            range.hi
                        } else {
                            range.lo + step * k as f64
                        }
                    })
                    .collect()
            }
        };
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of the option at `index`.
    pub fn value(&self, index: usize) -> Result<f64> {
        self.values
            .get(index)
            .copied()
            .ok_or(Error::OptionOutOfRange {
                index,
                options: self.values.len(),
            })
    }

    /// Index of the option equal to `value`, if any.
    pub fn index_of(&self, value: f64) -> Option<usize> {
        self.values.iter().position(|&v| v == value)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.index_of(value).is_some()
    }
}

/// Option sets for every agent in the swarm.
///
/// All agents share the same option count so that an option index chosen by
/// one agent addresses the same slot in its neighbour's row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpace {
    sets: Vec<OptionSet>,
    options: usize,
}

impl ActionSpace {
    pub fn from_config(config: &LearnerConfig) -> Result<Self> {
        config.validate()?;
        let sets = (0..config.agents)
            .map(|agent| OptionSet::linspace(config.range_for(agent), config.options))
            .collect();
        Ok(Self {
            sets,
            options: config.options,
        })
    }

    pub fn agents(&self) -> usize {
        self.sets.len()
    }

    /// Options per agent (k).
    pub fn options(&self) -> usize {
        self.options
    }

    pub fn for_agent(&self, agent: usize) -> Result<&OptionSet> {
        self.sets.get(agent).ok_or(Error::AgentOutOfRange {
            agent,
            agents: self.sets.len(),
        })
    }

    /// Resolve an option value of `agent` to its index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOption`] when the value is not one of the agent's options.
    pub fn index_of(&self, agent: usize, value: f64) -> Result<usize> {
        self.for_agent(agent)?
            .index_of(value)
            .ok_or(Error::UnknownOption { agent, value })
    }
}
