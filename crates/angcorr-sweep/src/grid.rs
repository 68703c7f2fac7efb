use angcorr_core::errors::{AngCorrError, ErrorInfo};
use serde::{Deserialize, Serialize};

/// Evenly spaced samples of `arctan(delta)` covering `[-max, max]` in delta.
///
/// Sampling the arctangent keeps the pure-multipolarity limits
/// `delta -> +-inf` within reach of a finite grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridRecord")]
pub struct ArctanGrid {
    max_magnitude: f64,
    arctan_deltas: Vec<f64>,
}

#[derive(Deserialize)]
struct GridRecord {
    max_magnitude: f64,
    arctan_deltas: Vec<f64>,
}

impl TryFrom<GridRecord> for ArctanGrid {
    type Error = AngCorrError;

    fn try_from(record: GridRecord) -> Result<Self, Self::Error> {
        let grid = ArctanGrid::new(record.arctan_deltas.len(), record.max_magnitude)?;
        let matches = grid
            .arctan_deltas
            .iter()
            .zip(&record.arctan_deltas)
            .all(|(built, stored)| built.to_bits() == stored.to_bits());
        if !matches {
            return Err(AngCorrError::InvalidArgument(
                ErrorInfo::new(
                    "grid-mismatch",
                    "stored samples differ from the grid they claim to describe",
                )
                .with_context("resolution", grid.len())
                .with_context("max_magnitude", record.max_magnitude),
            ));
        }
        Ok(grid)
    }
}

impl ArctanGrid {
    /// Builds `resolution` points between `atan(-max_magnitude)` and
    /// `atan(max_magnitude)`, both included.
    pub fn new(resolution: usize, max_magnitude: f64) -> Result<Self, AngCorrError> {
        validate_grid(resolution, max_magnitude)?;
        let start = (-max_magnitude).atan();
        let stop = max_magnitude.atan();
        let step = (stop - start) / (resolution - 1) as f64;
        let mut arctan_deltas: Vec<f64> = (0..resolution)
            .map(|idx| start + idx as f64 * step)
            .collect();
        arctan_deltas[resolution - 1] = stop;
        Ok(Self {
            max_magnitude,
            arctan_deltas,
        })
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.arctan_deltas.len()
    }

    /// Always false; a grid holds at least two points.
    pub fn is_empty(&self) -> bool {
        self.arctan_deltas.is_empty()
    }

    /// Largest mixing-ratio magnitude on the grid.
    pub fn max_magnitude(&self) -> f64 {
        self.max_magnitude
    }

    /// Arctangent samples in increasing order.
    pub fn arctan_deltas(&self) -> &[f64] {
        &self.arctan_deltas
    }

    /// Arctangent value at `index`.
    pub fn arctan_delta(&self, index: usize) -> Option<f64> {
        self.arctan_deltas.get(index).copied()
    }

    /// Mixing ratio `tan(arctan_deltas[index])`.
    pub fn delta(&self, index: usize) -> Option<f64> {
        self.arctan_delta(index).map(f64::tan)
    }

    /// All mixing ratios in increasing order.
    pub fn deltas(&self) -> Vec<f64> {
        self.arctan_deltas.iter().map(|value| value.tan()).collect()
    }

    /// Index of the sample closest to `delta = 0`.
    pub fn zero_index(&self) -> usize {
        let mut best = 0;
        for (idx, value) in self.arctan_deltas.iter().enumerate() {
            if value.abs() < self.arctan_deltas[best].abs() {
                best = idx;
            }
        }
        best
    }
}

pub(crate) fn validate_grid(resolution: usize, max_magnitude: f64) -> Result<(), AngCorrError> {
    if resolution < 2 {
        return Err(AngCorrError::InvalidArgument(
            ErrorInfo::new("resolution-too-small", "grid resolution must be at least 2")
                .with_context("resolution", resolution),
        ));
    }
    if !(max_magnitude.is_finite() && max_magnitude > 0.0) {
        return Err(AngCorrError::InvalidArgument(
            ErrorInfo::new(
                "invalid-max-magnitude",
                "maximum mixing-ratio magnitude must be positive and finite",
            )
            .with_context("max_magnitude", max_magnitude),
        ));
    }
    Ok(())
}
