use angcorr_core::errors::{AngCorrError, ErrorInfo};
use serde::{Deserialize, Serialize};

use crate::grid::validate_grid;
use crate::serde::{from_json_slice, from_yaml_str};

fn default_resolution() -> usize {
    101
}

fn default_max_magnitude() -> f64 {
    100.0
}

fn default_parallelism() -> usize {
    1
}

/// Grid and scheduling parameters of a mixing-ratio sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Number of grid points per free parameter.
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    /// Largest mixing-ratio magnitude explored.
    #[serde(default = "default_max_magnitude")]
    pub max_magnitude: f64,
    /// Number of worker threads; 1 runs the sweep on the calling thread.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            max_magnitude: default_max_magnitude(),
            parallelism: default_parallelism(),
        }
    }
}

impl SweepConfig {
    /// Creates a sequential configuration for the given grid.
    pub fn new(resolution: usize, max_magnitude: f64) -> Self {
        Self {
            resolution,
            max_magnitude,
            parallelism: default_parallelism(),
        }
    }

    /// Sets the number of worker threads.
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Checks the grid bounds and the worker count.
    pub fn validate(&self) -> Result<(), AngCorrError> {
        validate_grid(self.resolution, self.max_magnitude)?;
        if self.parallelism == 0 {
            return Err(AngCorrError::InvalidArgument(
                ErrorInfo::new("zero-parallelism", "at least one worker is required")
                    .with_hint("use parallelism: 1 for a sequential sweep"),
            ));
        }
        Ok(())
    }

    /// Parses and validates a YAML configuration.
    pub fn from_yaml_str(data: &str) -> Result<Self, AngCorrError> {
        let config: Self = from_yaml_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, AngCorrError> {
        let config: Self = from_json_slice(data)?;
        config.validate()?;
        Ok(config)
    }
}
