use super::traits::ConfigSection;
use crate::error::EvotrailError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Path to the trail-map text file.
    pub map_path: String,
    /// Move budget per evaluation; every move/turn consumes one unit.
    pub move_limit: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            map_path: "data/santafe_trail.txt".to_string(),
            move_limit: 600,
        }
    }
}

impl ConfigSection for SimulationConfig {
    fn section_name() -> &'static str {
        "simulation"
    }

    fn validate(&self) -> Result<(), EvotrailError> {
        if self.map_path.is_empty() {
            return Err(EvotrailError::Configuration(
                "Map path must not be empty".to_string(),
            ));
        }
        if self.move_limit == 0 {
            return Err(EvotrailError::Configuration(
                "Move limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
