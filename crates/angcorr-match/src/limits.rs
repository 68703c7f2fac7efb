use angcorr_core::errors::{AngCorrError, ErrorInfo};
use angcorr_sweep::AsymmetryGrid;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Half-width of the fixed observable window.
pub const UNSCALED_HALF_WIDTH: f64 = 1.1;

/// Relative margin added on both sides of scaled limits.
pub const SCALED_MARGIN: f64 = 0.1;

/// Closed window `[low, high]` on an asymmetry axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservableLimits {
    /// Lower edge.
    pub low: f64,
    /// Upper edge.
    pub high: f64,
}

impl ObservableLimits {
    /// Creates validated limits.
    pub fn new(low: f64, high: f64) -> Result<Self, AngCorrError> {
        let limits = Self { low, high };
        limits.validate()?;
        Ok(limits)
    }

    /// Requires finite edges with `low <= high`.
    pub fn validate(&self) -> Result<(), AngCorrError> {
        if !(self.low.is_finite() && self.high.is_finite()) || self.low > self.high {
            return Err(AngCorrError::InvalidArgument(
                ErrorInfo::new("invalid-limits", "limits must be finite with low <= high")
                    .with_context("low", self.low)
                    .with_context("high", self.high),
            ));
        }
        Ok(())
    }

    /// `[-1.1, 1.1]`, wide enough for any asymmetry.
    pub fn unscaled() -> Self {
        Self {
            low: -UNSCALED_HALF_WIDTH,
            high: UNSCALED_HALF_WIDTH,
        }
    }

    /// `[min - 0.1 range, max + 0.1 range]` over the finite entries of
    /// `values`; falls back to [`ObservableLimits::unscaled`] when none is
    /// finite.
    pub fn scaled(values: &[f64]) -> Self {
        let mut finite = values.iter().copied().filter(|value| value.is_finite());
        let Some(first) = finite.next() else {
            warn!("no finite asymmetry values; using unscaled limits");
            return Self::unscaled();
        };
        let (min, max) = finite.fold((first, first), |(lo, hi), value| {
            (lo.min(value), hi.max(value))
        });
        let range = max - min;
        Self {
            low: min - SCALED_MARGIN * range,
            high: max + SCALED_MARGIN * range,
        }
    }

    /// Width of the window.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// `bins` evenly spaced centers from `low` to `high`, both included.
    pub fn centers(&self, bins: usize) -> Vec<f64> {
        match bins {
            0 => Vec::new(),
            1 => vec![self.low],
            _ => {
                let step = self.range() / (bins - 1) as f64;
                let mut centers: Vec<f64> =
                    (0..bins).map(|idx| self.low + idx as f64 * step).collect();
                centers[bins - 1] = self.high;
                centers
            }
        }
    }
}

fn argmin_by<F: Fn(f64) -> f64>(values: &[f64], key: F) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &value) in values.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        let score = key(value);
        if best.map_or(true, |(_, current)| score < current) {
            best = Some((idx, score));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Index of the center closest to `value`; ties go to the lower index.
pub fn nearest_center(centers: &[f64], value: f64) -> Option<usize> {
    if value.is_nan() {
        return None;
    }
    argmin_by(centers, |center| (center - value).abs())
}

/// Reference points of a one-parameter sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmarks {
    /// Grid index closest to `delta = 0`.
    pub delta_zero: usize,
    /// Mixing ratio at the lower grid end, standing in for `delta -> -inf`.
    pub delta_low_end: f64,
    /// Mixing ratio at the upper grid end, standing in for `delta -> +inf`.
    pub delta_high_end: f64,
    /// Index of the smallest defined A45 value.
    pub a45_min: Option<usize>,
    /// Index of the largest defined A45 value.
    pub a45_max: Option<usize>,
    /// Index of the smallest defined A90 value.
    pub a90_min: Option<usize>,
    /// Index of the largest defined A90 value.
    pub a90_max: Option<usize>,
}

impl Landmarks {
    /// Locates the landmarks of a one-parameter grid.
    pub fn from_grid(grid: &AsymmetryGrid) -> Result<Self, AngCorrError> {
        if grid.free_parameters() != 1 {
            return Err(AngCorrError::InvalidState(
                ErrorInfo::new("single-parameter-grid-required", "landmarks need a 1D sweep")
                    .with_context("free_parameters", grid.free_parameters()),
            ));
        }
        let axis = grid.arctan_grid();
        let delta_zero = axis.zero_index();
        let arctan_zero = axis.arctan_deltas()[delta_zero];
        if arctan_zero != 0.0 {
            warn!(
                delta = arctan_zero.tan(),
                "grid has no exact delta = 0 node; using the closest one"
            );
        }
        let last = axis.len() - 1;
        Ok(Self {
            delta_zero,
            delta_low_end: axis.arctan_deltas()[0].tan(),
            delta_high_end: axis.arctan_deltas()[last].tan(),
            a45_min: argmin_by(grid.a45(), |value| value),
            a45_max: argmin_by(grid.a45(), |value| -value),
            a90_min: argmin_by(grid.a90(), |value| value),
            a90_max: argmin_by(grid.a90(), |value| -value),
        })
    }
}
