//! Action table and ε-greedy action selection.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    q_learning::{options::ActionSpace, q_table::QTable},
    types::{Pair, PairScope},
};

/// Active option index for every ordered pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTable {
    agents: usize,
    selected: Vec<usize>,
}

impl ActionTable {
    /// Table with every pair holding option 0.
    pub fn new(agents: usize) -> Self {
        Self {
            agents,
            selected: vec![0; agents * agents.saturating_sub(1)],
        }
    }

    pub fn agents(&self) -> usize {
        self.agents
    }

    fn slot(&self, pair: Pair) -> Result<usize> {
        for agent in [pair.source(), pair.neighbour()] {
            if agent >= self.agents {
                return Err(Error::AgentOutOfRange {
                    agent,
                    agents: self.agents,
                });
            }
        }
        let column = if pair.neighbour() < pair.source() {
            pair.neighbour()
        } else {
            pair.neighbour() - 1
        };
        Ok(pair.source() * (self.agents - 1) + column)
    }

    /// Option index currently held by `pair`.
    pub fn get(&self, pair: Pair) -> Result<usize> {
        let slot = self.slot(pair)?;
        Ok(self.selected[slot])
    }

    pub(crate) fn set(&mut self, pair: Pair, option: usize) -> Result<()> {
        let slot = self.slot(pair)?;
        self.selected[slot] = option;
        Ok(())
    }

    /// Option value currently held by `pair`, resolved in the source agent's set.
    pub fn value(&self, pair: Pair, space: &ActionSpace) -> Result<f64> {
        space.for_agent(pair.source())?.value(self.get(pair)?)
    }
}

/// Whether a selection explored or exploited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    Explore,
    Exploit,
}

/// ε-greedy selector.
///
/// A single coin is flipped per call; the outcome applies to every pair in
/// the requested scope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionSelector {
    explore_rate: f64,
}

impl ActionSelector {
    pub fn new(explore_rate: f64) -> Self {
        Self { explore_rate }
    }

    pub fn explore_rate(&self) -> f64 {
        self.explore_rate
    }

    pub fn set_explore_rate(&mut self, explore_rate: f64) {
        self.explore_rate = explore_rate.clamp(0.0, 1.0);
    }

    /// Redraw the actions of every pair in `scope`.
    pub fn select<R: Rng>(
        &self,
        scope: PairScope,
        q_table: &QTable,
        space: &ActionSpace,
        actions: &mut ActionTable,
        rng: &mut R,
    ) -> Result<SelectionMode> {
        let mode = if rng.random::<f64>() < self.explore_rate {
            SelectionMode::Explore
        } else {
            SelectionMode::Exploit
        };

        for pair in scope.pairs(space.agents())? {
            let option = match mode {
                SelectionMode::Explore => {
                    rng.random_range(0..space.for_agent(pair.source())?.len())
                }
                SelectionMode::Exploit => q_table.best_option(pair)?,
            };
            actions.set(pair, option)?;
        }

        Ok(mode)
    }
}
