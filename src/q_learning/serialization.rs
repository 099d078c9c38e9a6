//! Snapshot documents and saved learner state.

use std::{
    collections::BTreeMap,
    io::{Read, Write},
};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    identifiers::{AgentLabel, NeighbourLabel, OptionKey},
    q_learning::{agent::LearnerState, options::ActionSpace, q_table::QTable},
    types::PairScope,
};

/// One Q-table rendered as Agent → Neighbour → option value → estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableSnapshot(BTreeMap<AgentLabel, BTreeMap<NeighbourLabel, BTreeMap<OptionKey, f64>>>);

impl TableSnapshot {
    /// Render `table` using the option values of `space`.
    pub fn from_table(table: &QTable, space: &ActionSpace) -> Result<Self> {
        let mut agents = BTreeMap::new();
        for pair in PairScope::All.pairs(table.agents())? {
            let values = space.for_agent(pair.source())?.values();
            let row = table.row(pair)?;
            let options = values
                .iter()
                .zip(row.iter())
                .map(|(&value, &estimate)| (OptionKey::new(value), estimate))
                .collect();
            agents
                .entry(AgentLabel::new(pair.source()))
                .or_insert_with(BTreeMap::new)
                .insert(NeighbourLabel::new(pair.neighbour()), options);
        }
        Ok(Self(agents))
    }

    /// Estimates recorded for `(agent, neighbour)`, keyed by option value.
    pub fn options(&self, agent: usize, neighbour: usize) -> Option<&BTreeMap<OptionKey, f64>> {
        self.0
            .get(&AgentLabel::new(agent))?
            .get(&NeighbourLabel::new(neighbour))
    }

    /// Option value with the largest estimate for the pair, earliest on ties.
    pub fn greedy(&self, agent: usize, neighbour: usize) -> Option<(f64, f64)> {
        let mut best: Option<(f64, f64)> = None;
        for (key, &estimate) in self.options(agent, neighbour)? {
            if best.is_none_or(|(_, top)| estimate > top) {
                best = Some((key.value(), estimate));
            }
        }
        best
    }

    /// Agent indices present, ascending.
    pub fn agents(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.keys().map(AgentLabel::index)
    }

    /// Neighbour indices recorded for `agent`, ascending.
    pub fn neighbours(&self, agent: usize) -> impl Iterator<Item = usize> + '_ {
        self.0
            .get(&AgentLabel::new(agent))
            .into_iter()
            .flat_map(|row| row.keys().map(NeighbourLabel::index))
    }
}

/// Persisted history: update counter → table snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotDocument(BTreeMap<u64, TableSnapshot>);

impl SnapshotDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from buffered `(counter, table)` entries.
    pub fn from_history<I>(entries: I, space: &ActionSpace) -> Result<Self>
    where
        I: IntoIterator<Item = (u64, QTable)>,
    {
        let mut document = Self::new();
        for (key, table) in entries {
            document.insert(key, TableSnapshot::from_table(&table, space)?);
        }
        Ok(document)
    }

    pub fn insert(&mut self, key: u64, snapshot: TableSnapshot) {
        self.0.insert(key, snapshot);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.keys().copied()
    }

    pub fn get(&self, key: u64) -> Option<&TableSnapshot> {
        self.0.get(&key)
    }

    /// Entry with the highest counter.
    pub fn latest(&self) -> Option<(u64, &TableSnapshot)> {
        self.0.iter().next_back().map(|(&key, snapshot)| (key, snapshot))
    }

    /// Write the document as JSON.
    pub fn to_writer<W: Write>(&self, writer: W, pretty: bool) -> Result<()> {
        if pretty {
            serde_json::to_writer_pretty(writer, self)?;
        } else {
            serde_json::to_writer(writer, self)?;
        }
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Versioned, self-contained learner checkpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedLearner {
    pub version: u32,
    state: LearnerState,
}

impl SavedLearner {
    pub const VERSION: u32 = 1;

    pub(crate) fn new(state: LearnerState) -> Self {
        Self {
            version: Self::VERSION,
            state,
        }
    }

    pub(crate) fn into_state(self) -> Result<LearnerState> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(self.state)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec(self).map_err(|e| Error::SerializationContext {
            operation: "serialize learner to MessagePack".to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize learner from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}
