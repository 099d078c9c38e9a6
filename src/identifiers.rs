//! Label types used as keys in persisted Q-table snapshots.
//!
//! Inside the learner every entry is addressed by index. These wrappers only
//! exist at the storage boundary, where snapshots are keyed by human-readable
//! strings such as `"Agent 0"`, `"Neighbour 2"` and `"5"`.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{Error, Result};

const AGENT_PREFIX: &str = "Agent ";
const NEIGHBOUR_PREFIX: &str = "Neighbour ";

fn parse_indexed(label: &str, prefix: &str) -> Result<usize> {
    label
        .strip_prefix(prefix)
        .and_then(|rest| rest.trim().parse().ok())
        .ok_or_else(|| Error::InvalidLabelFormat {
            label: label.to_string(),
            expected: format!("{prefix}<index>"),
        })
}

/// Label of the agent that owns a row of the table (`"Agent i"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentLabel(usize);

impl AgentLabel {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for AgentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{AGENT_PREFIX}{}", self.0)
    }
}

impl FromStr for AgentLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_indexed(s, AGENT_PREFIX).map(Self)
    }
}

/// Label of the neighbour a row refers to (`"Neighbour j"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeighbourLabel(usize);

impl NeighbourLabel {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NeighbourLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{NEIGHBOUR_PREFIX}{}", self.0)
    }
}

impl FromStr for NeighbourLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_indexed(s, NEIGHBOUR_PREFIX).map(Self)
    }
}

/// Stringified option value, ordered numerically.
#[derive(Debug, Clone, Copy)]
pub struct OptionKey(f64);

impl OptionKey {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialEq for OptionKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OptionKey {}

impl PartialOrd for OptionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OptionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OptionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Self)
            .ok_or_else(|| Error::InvalidLabelFormat {
                label: s.to_string(),
                expected: "<finite number>".to_string(),
            })
    }
}

macro_rules! string_keyed_serde {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                    let raw = String::deserialize(deserializer)?;
                    raw.parse().map_err(de::Error::custom)
                }
            }
        )*
    };
}

string_keyed_serde!(AgentLabel, NeighbourLabel, OptionKey);
