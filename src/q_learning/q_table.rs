//! Pairwise Q-table.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, types::Pair};

/// Q-values for every ordered agent pair and every option index.
///
/// Storage is a dense `n × (n − 1) × k` block. Self-pairs have no slot: the
/// neighbour index is compacted by skipping the source agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    agents: usize,
    options: usize,
    values: Vec<f64>,
}

impl QTable {
    /// Create a zero-initialized table.
    pub fn new(agents: usize, options: usize) -> Self {
        Self {
            agents,
            options,
            values: vec![0.0; agents * agents.saturating_sub(1) * options],
        }
    }

    pub fn agents(&self) -> usize {
        self.agents
    }

    pub fn options(&self) -> usize {
        self.options
    }

    /// Total number of stored estimates.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn check_agent(&self, agent: usize) -> Result<()> {
        if agent < self.agents {
            Ok(())
        } else {
            Err(Error::AgentOutOfRange {
                agent,
                agents: self.agents,
            })
        }
    }

    fn row_offset(&self, pair: Pair) -> Result<usize> {
        self.check_agent(pair.source())?;
        self.check_agent(pair.neighbour())?;
        let slot = if pair.neighbour() < pair.source() {
            pair.neighbour()
        } else {
            pair.neighbour() - 1
        };
        Ok((pair.source() * (self.agents - 1) + slot) * self.options)
    }

    fn offset(&self, pair: Pair, option: usize) -> Result<usize> {
        if option >= self.options {
            return Err(Error::OptionOutOfRange {
                index: option,
                options: self.options,
            });
        }
        Ok(self.row_offset(pair)? + option)
    }

    /// Estimate for `(source, neighbour, option)`.
    pub fn get(&self, source: usize, neighbour: usize, option: usize) -> Result<f64> {
        self.get_pair(Pair::new(source, neighbour)?, option)
    }

    /// Overwrite the estimate for `(source, neighbour, option)`.
    pub fn set(&mut self, source: usize, neighbour: usize, option: usize, value: f64) -> Result<()> {
        self.set_pair(Pair::new(source, neighbour)?, option, value)
    }

    pub fn get_pair(&self, pair: Pair, option: usize) -> Result<f64> {
        let offset = self.offset(pair, option)?;
        Ok(self.values[offset])
    }

    pub fn set_pair(&mut self, pair: Pair, option: usize, value: f64) -> Result<()> {
        let offset = self.offset(pair, option)?;
        self.values[offset] = value;
        Ok(())
    }

    /// All option estimates for one pair, in option order.
    pub fn row(&self, pair: Pair) -> Result<&[f64]> {
        let start = self.row_offset(pair)?;
        Ok(&self.values[start..start + self.options])
    }

    /// Option index with the highest estimate for `pair`.
    ///
    /// Ties resolve to the earliest option, so a fresh table always yields 0.
    pub fn best_option(&self, pair: Pair) -> Result<usize> {
        let row = self.row(pair)?;
        let mut best = 0;
        for (index, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = index;
            }
        }
        Ok(best)
    }

    /// Zero every estimate.
    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(|value| *value = 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qtable_initialization() {
        let qtable = QTable::new(3, 3);
        assert_eq!(qtable.len(), 3 * 2 * 3);
        for source in 0..3 {
            for neighbour in (0..3).filter(|&n| n != source) {
                for option in 0..3 {
                    assert_eq!(qtable.get(source, neighbour, option).unwrap(), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = QTable::new(4, 3);
        qtable.set(2, 3, 1, 1.5).unwrap();
        assert_eq!(qtable.get(2, 3, 1).unwrap(), 1.5);
        assert_eq!(qtable.get(3, 2, 1).unwrap(), 0.0);
        assert_eq!(qtable.get(2, 1, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_every_pair_has_a_distinct_slot() {
        let mut qtable = QTable::new(4, 2);
        let mut counter = 0.0;
        for source in 0..4 {
            for neighbour in (0..4).filter(|&n| n != source) {
                for option in 0..2 {
                    counter += 1.0;
                    qtable.set(source, neighbour, option, counter).unwrap();
                }
            }
        }
        let mut expected = 0.0;
        for source in 0..4 {
            for neighbour in (0..4).filter(|&n| n != source) {
                for option in 0..2 {
                    expected += 1.0;
                    assert_eq!(qtable.get(source, neighbour, option).unwrap(), expected);
                }
            }
        }
    }

    #[test]
    fn test_rejects_invalid_addresses() {
        let mut qtable = QTable::new(3, 3);
        assert!(matches!(qtable.get(1, 1, 0), Err(Error::SelfPair { agent: 1 })));
        assert!(qtable.set(0, 0, 0, 1.0).is_err());
        assert!(matches!(
            qtable.get(0, 3, 0),
            Err(Error::AgentOutOfRange { agent: 3, .. })
        ));
        assert!(matches!(
            qtable.get(0, 1, 3),
            Err(Error::OptionOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn test_best_option_tie_breaks_first() {
        let mut qtable = QTable::new(3, 3);
        let pair = Pair::new(0, 1).unwrap();
        assert_eq!(qtable.best_option(pair).unwrap(), 0);

        qtable.set_pair(pair, 1, 0.7).unwrap();
        qtable.set_pair(pair, 2, 0.7).unwrap();
        assert_eq!(qtable.best_option(pair).unwrap(), 1);

        qtable.set_pair(pair, 2, 0.9).unwrap();
        assert_eq!(qtable.best_option(pair).unwrap(), 2);
    }

    #[test]
    fn test_negative_values_are_not_clipped() {
        let mut qtable = QTable::new(2, 2);
        let pair = Pair::new(1, 0).unwrap();
        qtable.set_pair(pair, 0, -3.0).unwrap();
        qtable.set_pair(pair, 1, -1.0).unwrap();
        assert_eq!(qtable.best_option(pair).unwrap(), 1);
        assert_eq!(qtable.row(pair).unwrap(), &[-3.0, -1.0]);

        qtable.reset();
        assert_eq!(qtable.row(pair).unwrap(), &[0.0, 0.0]);
    }
}
