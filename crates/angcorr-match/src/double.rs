use std::f64::consts::PI;
use std::fmt;

use angcorr_core::errors::{AngCorrError, ErrorInfo};
use angcorr_sweep::{AsymmetryGrid, FreeParameter};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::band::ConfidenceBand;

pub(crate) fn require_two_parameters(grid: &AsymmetryGrid) -> Result<(), AngCorrError> {
    if grid.free_parameters() != 2 {
        return Err(AngCorrError::InvalidState(
            ErrorInfo::new(
                "two-parameter-grid-required",
                "this operation needs a two-parameter sweep",
            )
            .with_context("free_parameters", grid.free_parameters())
            .with_hint("match one-parameter grids with match_single"),
        ));
    }
    Ok(())
}

/// Which bands a grid cell satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellCategory {
    /// Neither band.
    Neither,
    /// Only the A45 band.
    A45,
    /// Only the A90 band.
    A90,
    /// Both bands.
    Both,
}

impl CellCategory {
    /// Category from the two band tests.
    pub fn from_tests(a45: bool, a90: bool) -> Self {
        match (a45, a90) {
            (true, true) => CellCategory::Both,
            (true, false) => CellCategory::A45,
            (false, true) => CellCategory::A90,
            (false, false) => CellCategory::Neither,
        }
    }
}

/// Range of one free parameter over the cells consistent with both bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterBounds {
    /// The bounded parameter.
    pub parameter: FreeParameter,
    /// Smallest `arctan(delta)`.
    pub arctan_min: f64,
    /// Largest `arctan(delta)`.
    pub arctan_max: f64,
}

impl ParameterBounds {
    fn at(parameter: FreeParameter, arctan: f64) -> Self {
        Self {
            parameter,
            arctan_min: arctan,
            arctan_max: arctan,
        }
    }

    fn include(&mut self, arctan: f64) {
        self.arctan_min = self.arctan_min.min(arctan);
        self.arctan_max = self.arctan_max.max(arctan);
    }

    /// Smallest mixing ratio.
    pub fn delta_min(&self) -> f64 {
        self.arctan_min.tan()
    }

    /// Largest mixing ratio.
    pub fn delta_max(&self) -> f64 {
        self.arctan_max.tan()
    }
}

impl fmt::Display for ParameterBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.parameter.index() + 1;
        write!(
            f,
            "arctan(δ_{label}) ∈ [{:+.2e} π, {:+.2e} π] (δ_{label} ∈ [{:+.2e}, {:+.2e}])",
            self.arctan_min / PI,
            self.arctan_max / PI,
            self.delta_min(),
            self.delta_max()
        )
    }
}

/// Per-cell classification of a two-parameter sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyMap {
    resolution: usize,
    categories: Vec<CellCategory>,
    bounds: Option<[ParameterBounds; 2]>,
}

impl ConsistencyMap {
    /// Grid points per parameter.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Categories in the grid's row-major order.
    pub fn categories(&self) -> &[CellCategory] {
        &self.categories
    }

    /// Category of cell `(i, j)`.
    pub fn category(&self, i: usize, j: usize) -> Option<CellCategory> {
        if i >= self.resolution || j >= self.resolution {
            return None;
        }
        self.categories.get(i * self.resolution + j).copied()
    }

    /// Bounds of `delta_1` and `delta_2` over the `Both` cells, `None` when
    /// there is no such cell.
    pub fn bounds(&self) -> Option<&[ParameterBounds; 2]> {
        self.bounds.as_ref()
    }

    /// Number of cells in `category`.
    pub fn count(&self, category: CellCategory) -> usize {
        self.categories
            .iter()
            .filter(|&&cell| cell == category)
            .count()
    }
}

/// Classifies every cell of a two-parameter sweep against both bands and
/// bounds the parameters over the cells that satisfy both.
pub fn classify_cells(
    grid: &AsymmetryGrid,
    a45_band: &ConfidenceBand,
    a90_band: &ConfidenceBand,
) -> Result<ConsistencyMap, AngCorrError> {
    require_two_parameters(grid)?;
    a45_band.validate()?;
    a90_band.validate()?;

    let n = grid.resolution();
    let arctan = grid.arctan_deltas();
    let mut categories = Vec::with_capacity(grid.cell_count());
    let mut bounds: Option<[ParameterBounds; 2]> = None;

    for (flat, (&a45, &a90)) in grid.a45().iter().zip(grid.a90()).enumerate() {
        let category = CellCategory::from_tests(a45_band.contains(a45), a90_band.contains(a90));
        if category == CellCategory::Both {
            let (first, second) = (arctan[flat / n], arctan[flat % n]);
            match bounds.as_mut() {
                Some([slot1, slot2]) => {
                    slot1.include(first);
                    slot2.include(second);
                }
                None => {
                    bounds = Some([
                        ParameterBounds::at(FreeParameter::Slot1, first),
                        ParameterBounds::at(FreeParameter::Slot2, second),
                    ])
                }
            }
        }
        categories.push(category);
    }

    let map = ConsistencyMap {
        resolution: n,
        categories,
        bounds,
    };
    match map.bounds() {
        Some([slot1, slot2]) => {
            info!(both = map.count(CellCategory::Both), bounds = %slot1, "consistent cells");
            info!(bounds = %slot2, "consistent cells");
        }
        None => info!("no cell agrees with both constraints"),
    }
    Ok(map)
}
