//! Run configuration files for CLI commands

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{LearnerConfig, pipeline::SimulationConfig};

/// Learner and simulation settings read from a single JSON file.
///
/// Either section may be omitted; missing fields take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub learner: LearnerConfig,
    pub simulation: SimulationConfig,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config: {}", path.display()))?;
        serde_json::from_reader(file)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: RunConfig =
            serde_json::from_str(r#"{"learner": {"agents": 4}, "simulation": {"steps": 10}}"#)
                .unwrap();
        assert_eq!(config.learner.agents, 4);
        assert_eq!(config.learner.options, 3);
        assert_eq!(config.simulation.steps, 10);
        assert_eq!(config.simulation.landmarks, 3);
    }
}
