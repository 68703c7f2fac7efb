use std::fmt;

use angcorr_core::errors::{AngCorrError, ErrorInfo};
use angcorr_sweep::serde::{from_json_slice, from_yaml_str};
use angcorr_sweep::{ArctanGrid, AsymmetryGrid};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::band::ConfidenceBand;
use crate::intervals::{find_interval_overlaps, find_true_intervals, IndexRange};

/// Measured asymmetries to compare a sweep against. Either observable may be
/// left unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentalConstraints {
    /// Band for the 45 degree asymmetry.
    #[serde(default)]
    pub a45: Option<ConfidenceBand>,
    /// Band for the 90 degree asymmetry.
    #[serde(default)]
    pub a90: Option<ConfidenceBand>,
}

impl ExperimentalConstraints {
    /// Constrains the 45 degree asymmetry.
    pub fn with_a45(mut self, band: ConfidenceBand) -> Self {
        self.a45 = Some(band);
        self
    }

    /// Constrains the 90 degree asymmetry.
    pub fn with_a90(mut self, band: ConfidenceBand) -> Self {
        self.a90 = Some(band);
        self
    }

    /// Validates every band present.
    pub fn validate(&self) -> Result<(), AngCorrError> {
        for band in self.a45.iter().chain(self.a90.iter()) {
            band.validate()?;
        }
        Ok(())
    }

    /// Parses and validates YAML constraints.
    pub fn from_yaml_str(data: &str) -> Result<Self, AngCorrError> {
        let constraints: Self = from_yaml_str(data)?;
        constraints.validate()?;
        Ok(constraints)
    }

    /// Parses and validates JSON constraints.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, AngCorrError> {
        let constraints: Self = from_json_slice(data)?;
        constraints.validate()?;
        Ok(constraints)
    }
}

/// Mixing-ratio interval backed by a run of grid indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaInterval {
    /// Grid indices of the run.
    pub indices: IndexRange,
    /// `arctan(delta)` at the first index.
    pub arctan_low: f64,
    /// `arctan(delta)` at the last index.
    pub arctan_high: f64,
    /// `delta` at the first index.
    pub delta_low: f64,
    /// `delta` at the last index.
    pub delta_high: f64,
}

impl DeltaInterval {
    /// Maps a non-empty index range onto the grid's mixing ratios.
    pub fn from_range(grid: &ArctanGrid, indices: IndexRange) -> Option<Self> {
        if indices.is_empty() {
            return None;
        }
        let arctan_low = grid.arctan_delta(indices.start)?;
        let arctan_high = grid.arctan_delta(indices.end - 1)?;
        Some(Self {
            indices,
            arctan_low,
            arctan_high,
            delta_low: arctan_low.tan(),
            delta_high: arctan_high.tan(),
        })
    }

    /// Whether `delta` lies between the interval bounds.
    pub fn contains_delta(&self, delta: f64) -> bool {
        self.delta_low <= delta && delta <= self.delta_high
    }
}

impl fmt::Display for DeltaInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "δ ∈ [{:+.2e}, {:+.2e}] (arctan(δ) ∈ [{:+.2e}, {:+.2e}])",
            self.delta_low, self.delta_high, self.arctan_low, self.arctan_high
        )
    }
}

/// Result of matching one set of constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "intervals", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// No band was given for this observable.
    Unconstrained,
    /// A band was given but no grid value satisfies it.
    NoConsistentValues,
    /// Mixing-ratio intervals that satisfy the constraint.
    Consistent(Vec<DeltaInterval>),
}

impl MatchOutcome {
    fn from_ranges(grid: &ArctanGrid, ranges: &[IndexRange]) -> Self {
        let intervals: Vec<DeltaInterval> = ranges
            .iter()
            .filter_map(|&range| DeltaInterval::from_range(grid, range))
            .collect();
        if intervals.is_empty() {
            MatchOutcome::NoConsistentValues
        } else {
            MatchOutcome::Consistent(intervals)
        }
    }

    /// Intervals found, empty unless consistent.
    pub fn intervals(&self) -> &[DeltaInterval] {
        match self {
            MatchOutcome::Consistent(intervals) => intervals.as_slice(),
            _ => &[],
        }
    }

    /// Whether at least one consistent interval exists.
    pub fn is_consistent(&self) -> bool {
        matches!(self, MatchOutcome::Consistent(_))
    }
}

/// Per-observable and combined intervals of a one-parameter sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleParameterReport {
    /// Intervals satisfying the A45 band.
    pub a45: MatchOutcome,
    /// Intervals satisfying the A90 band.
    pub a90: MatchOutcome,
    /// Intervals satisfying every band given.
    pub combined: MatchOutcome,
}

fn ranges_for(values: &[f64], band: Option<&ConfidenceBand>) -> Option<Vec<IndexRange>> {
    band.map(|band| find_true_intervals(&band.mask(values)))
}

fn log_outcome(label: &str, band: Option<&ConfidenceBand>, outcome: &MatchOutcome) {
    match (band, outcome) {
        (_, MatchOutcome::Unconstrained) => {}
        (Some(band), _) => info!(observable = label, band = %band, "matching confidence band"),
        (None, _) => info!(observable = label, "combined result"),
    }
    match outcome {
        MatchOutcome::Unconstrained => {}
        MatchOutcome::NoConsistentValues => {
            info!(observable = label, "no value of δ agrees with the constraint")
        }
        MatchOutcome::Consistent(intervals) => {
            for interval in intervals {
                info!(observable = label, interval = %interval, "consistent interval");
            }
        }
    }
}

/// Finds the mixing-ratio intervals of a one-parameter sweep that agree with
/// the given bands.
///
/// When both observables are constrained the combined outcome is the overlap
/// of both interval lists; an empty overlap is reported as
/// [`MatchOutcome::NoConsistentValues`], never as an error.
pub fn match_single(
    grid: &AsymmetryGrid,
    constraints: &ExperimentalConstraints,
) -> Result<SingleParameterReport, AngCorrError> {
    if grid.free_parameters() != 1 {
        return Err(AngCorrError::InvalidState(
            ErrorInfo::new(
                "single-parameter-grid-required",
                "interval matching needs a one-parameter sweep",
            )
            .with_context("free_parameters", grid.free_parameters())
            .with_hint("classify two-parameter grids with classify_cells"),
        ));
    }
    constraints.validate()?;

    let axis = grid.arctan_grid();
    let a45_ranges = ranges_for(grid.a45(), constraints.a45.as_ref());
    let a90_ranges = ranges_for(grid.a90(), constraints.a90.as_ref());
    let outcome = |ranges: &Option<Vec<IndexRange>>| match ranges {
        Some(ranges) => MatchOutcome::from_ranges(axis, ranges),
        None => MatchOutcome::Unconstrained,
    };

    let a45 = outcome(&a45_ranges);
    let a90 = outcome(&a90_ranges);
    let combined = match (&a45_ranges, &a90_ranges) {
        (Some(left), Some(right)) => {
            MatchOutcome::from_ranges(axis, &find_interval_overlaps(left, right))
        }
        (Some(_), None) => a45.clone(),
        (None, Some(_)) => a90.clone(),
        (None, None) => MatchOutcome::Unconstrained,
    };

    log_outcome("A45", constraints.a45.as_ref(), &a45);
    log_outcome("A90", constraints.a90.as_ref(), &a90);
    if a45_ranges.is_some() && a90_ranges.is_some() {
        log_outcome("combined", None, &combined);
    }

    Ok(SingleParameterReport { a45, a90, combined })
}
