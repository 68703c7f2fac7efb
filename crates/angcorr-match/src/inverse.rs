use angcorr_core::errors::{AngCorrError, ErrorInfo};
use angcorr_sweep::{AsymmetryGrid, FreeParameter};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::double::require_two_parameters;
use crate::limits::{nearest_center, ObservableLimits};

fn default_bins() -> usize {
    100
}

/// Histogram layout for [`inverse_envelopes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InverseOptions {
    /// Bins per observable axis.
    #[serde(default = "default_bins")]
    pub bins: usize,
    /// A45 window; scaled to the grid's values when absent.
    #[serde(default)]
    pub a45_limits: Option<ObservableLimits>,
    /// A90 window; scaled to the grid's values when absent.
    #[serde(default)]
    pub a90_limits: Option<ObservableLimits>,
}

impl Default for InverseOptions {
    fn default() -> Self {
        Self {
            bins: default_bins(),
            a45_limits: None,
            a90_limits: None,
        }
    }
}

impl InverseOptions {
    /// Checks the bin count and any explicit limits.
    pub fn validate(&self) -> Result<(), AngCorrError> {
        if self.bins == 0 {
            return Err(AngCorrError::InvalidArgument(
                ErrorInfo::new("zero-bins", "the histogram needs at least one bin per axis")
                    .with_hint("the default is 100 bins"),
            ));
        }
        for limits in self.a45_limits.iter().chain(self.a90_limits.iter()) {
            limits.validate()?;
        }
        Ok(())
    }
}

/// Range of parameter values that map into each bin of the (A45, A90) plane.
///
/// Bins are indexed `(a90_bin, a45_bin)`; bins without hits hold `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InverseEnvelopes {
    bins: usize,
    a45_limits: ObservableLimits,
    a90_limits: ObservableLimits,
    a45_centers: Vec<f64>,
    a90_centers: Vec<f64>,
    counts: Vec<usize>,
    arctan_min: [Vec<f64>; 2],
    arctan_max: [Vec<f64>; 2],
    skipped_cells: usize,
}

impl InverseEnvelopes {
    /// Bins per axis.
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Window of the A45 axis.
    pub fn a45_limits(&self) -> ObservableLimits {
        self.a45_limits
    }

    /// Window of the A90 axis.
    pub fn a90_limits(&self) -> ObservableLimits {
        self.a90_limits
    }

    /// Bin centers along A45.
    pub fn a45_centers(&self) -> &[f64] {
        &self.a45_centers
    }

    /// Bin centers along A90.
    pub fn a90_centers(&self) -> &[f64] {
        &self.a90_centers
    }

    /// Grid cells left out because an asymmetry was undefined.
    pub fn skipped_cells(&self) -> usize {
        self.skipped_cells
    }

    fn flat(&self, a90_bin: usize, a45_bin: usize) -> Option<usize> {
        (a90_bin < self.bins && a45_bin < self.bins).then(|| a90_bin * self.bins + a45_bin)
    }

    /// Number of grid cells that landed in the bin.
    pub fn count(&self, a90_bin: usize, a45_bin: usize) -> Option<usize> {
        self.flat(a90_bin, a45_bin)
            .and_then(|flat| self.counts.get(flat).copied())
    }

    /// Whether the bin received at least one cell.
    pub fn is_defined(&self, a90_bin: usize, a45_bin: usize) -> bool {
        self.count(a90_bin, a45_bin).map_or(false, |count| count > 0)
    }

    /// `(min, max)` of `arctan(delta)` for `parameter` in the bin; both `NaN`
    /// when the bin is empty.
    pub fn arctan_range(
        &self,
        parameter: FreeParameter,
        a90_bin: usize,
        a45_bin: usize,
    ) -> Option<(f64, f64)> {
        let flat = self.flat(a90_bin, a45_bin)?;
        let slot = parameter.index();
        Some((
            *self.arctan_min[slot].get(flat)?,
            *self.arctan_max[slot].get(flat)?,
        ))
    }

    /// Number of bins with at least one hit.
    pub fn occupied_bins(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }
}

/// Bins every defined cell of a two-parameter sweep into the (A45, A90)
/// plane by nearest bin center and records, per bin, the range of each
/// parameter that produced it.
pub fn inverse_envelopes(
    grid: &AsymmetryGrid,
    options: &InverseOptions,
) -> Result<InverseEnvelopes, AngCorrError> {
    require_two_parameters(grid)?;
    options.validate()?;

    let bins = options.bins;
    let a45_limits = options
        .a45_limits
        .unwrap_or_else(|| ObservableLimits::scaled(grid.a45()));
    let a90_limits = options
        .a90_limits
        .unwrap_or_else(|| ObservableLimits::scaled(grid.a90()));
    let a45_centers = a45_limits.centers(bins);
    let a90_centers = a90_limits.centers(bins);
    debug!(
        bins,
        a45_low = a45_limits.low,
        a45_high = a45_limits.high,
        a90_low = a90_limits.low,
        a90_high = a90_limits.high,
        "building inverse envelopes"
    );

    let total = bins * bins;
    let mut counts = vec![0usize; total];
    let mut arctan_min = [vec![f64::INFINITY; total], vec![f64::INFINITY; total]];
    let mut arctan_max = [vec![f64::NEG_INFINITY; total], vec![f64::NEG_INFINITY; total]];
    let mut skipped_cells = 0;

    let n = grid.resolution();
    let arctan = grid.arctan_deltas();
    for (flat, (&a45, &a90)) in grid.a45().iter().zip(grid.a90()).enumerate() {
        let bin = nearest_center(&a45_centers, a45)
            .zip(nearest_center(&a90_centers, a90))
            .map(|(a45_bin, a90_bin)| a90_bin * bins + a45_bin);
        let Some(bin) = bin else {
            skipped_cells += 1;
            continue;
        };
        for (slot, value) in [arctan[flat / n], arctan[flat % n]].into_iter().enumerate() {
            arctan_min[slot][bin] = arctan_min[slot][bin].min(value);
            arctan_max[slot][bin] = arctan_max[slot][bin].max(value);
        }
        counts[bin] += 1;
    }

    for (bin, &count) in counts.iter().enumerate() {
        if count == 0 {
            for slot in 0..2 {
                arctan_min[slot][bin] = f64::NAN;
                arctan_max[slot][bin] = f64::NAN;
            }
        }
    }
    if skipped_cells > 0 {
        warn!(skipped_cells, "undefined cells left out of the inverse histogram");
    }

    Ok(InverseEnvelopes {
        bins,
        a45_limits,
        a90_limits,
        a45_centers,
        a90_centers,
        counts,
        arctan_min,
        arctan_max,
        skipped_cells,
    })
}
