use angcorr_core::errors::{AngCorrError, ErrorInfo};
use angcorr_core::{CorrelationOracle, SchemaVersion};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::asymmetry::{compute_asymmetries, Asymmetries};
use crate::binding::{FreeParameter, ParameterBinding};
use crate::config::SweepConfig;
use crate::grid::ArctanGrid;
use crate::hash::{sample_bits, stable_hash_string};

/// Worker pools the host cannot provide are reported as unsupported
/// configurations.
fn pool_error(err: impl ToString) -> AngCorrError {
    AngCorrError::Unsupported(
        ErrorInfo::new("thread-pool", err.to_string())
            .with_hint("lower parallelism or use 1 for a sequential sweep"),
    )
}

fn grid_error(code: &str, message: &str) -> AngCorrError {
    AngCorrError::InvalidArgument(ErrorInfo::new(code, message))
}

/// Asymmetries sampled over the arctan grid of one or two free parameters.
///
/// Two-parameter grids are stored row-major: cell `(i, j)` was computed with
/// `delta_1 = delta(i)` and `delta_2 = delta(j)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AsymmetryGridRecord")]
pub struct AsymmetryGrid {
    schema_version: SchemaVersion,
    free_parameters: usize,
    grid: ArctanGrid,
    a45: Vec<f64>,
    a90: Vec<f64>,
    undefined_cells: usize,
    grid_hash: String,
}

#[derive(Deserialize)]
struct AsymmetryGridRecord {
    schema_version: SchemaVersion,
    free_parameters: usize,
    grid: ArctanGrid,
    a45: Vec<f64>,
    a90: Vec<f64>,
    undefined_cells: usize,
    grid_hash: String,
}

impl TryFrom<AsymmetryGridRecord> for AsymmetryGrid {
    type Error = AngCorrError;

    fn try_from(record: AsymmetryGridRecord) -> Result<Self, Self::Error> {
        if !(1..=2).contains(&record.free_parameters) {
            return Err(AngCorrError::InvalidArgument(
                ErrorInfo::new("free-parameter-count", "a grid spans one or two parameters")
                    .with_context("free_parameters", record.free_parameters),
            ));
        }
        let cells = record.grid.len().pow(record.free_parameters as u32);
        if record.a45.len() != cells || record.a90.len() != cells {
            return Err(AngCorrError::InvalidArgument(
                ErrorInfo::new("cell-count-mismatch", "sample arrays do not cover the grid")
                    .with_context("expected", cells)
                    .with_context("a45", record.a45.len())
                    .with_context("a90", record.a90.len()),
            ));
        }
        let undefined_cells = count_undefined(&record.a45, &record.a90);
        if undefined_cells != record.undefined_cells {
            return Err(grid_error(
                "undefined-count-mismatch",
                "stored undefined-cell count disagrees with the samples",
            ));
        }
        Ok(Self {
            schema_version: record.schema_version,
            free_parameters: record.free_parameters,
            grid: record.grid,
            a45: record.a45,
            a90: record.a90,
            undefined_cells,
            grid_hash: record.grid_hash,
        })
    }
}

fn count_undefined(a45: &[f64], a90: &[f64]) -> usize {
    a45.iter()
        .zip(a90)
        .filter(|(a45, a90)| a45.is_nan() || a90.is_nan())
        .count()
}

impl AsymmetryGrid {
    /// Number of swept parameters (1 or 2).
    pub fn free_parameters(&self) -> usize {
        self.free_parameters
    }

    /// Number of grid points per parameter.
    pub fn resolution(&self) -> usize {
        self.grid.len()
    }

    /// The arctan-transformed parameter grid.
    pub fn arctan_grid(&self) -> &ArctanGrid {
        &self.grid
    }

    /// Arctangent samples shared by every axis.
    pub fn arctan_deltas(&self) -> &[f64] {
        self.grid.arctan_deltas()
    }

    /// All A45 values, row-major for two parameters.
    pub fn a45(&self) -> &[f64] {
        &self.a45
    }

    /// All A90 values, row-major for two parameters.
    pub fn a90(&self) -> &[f64] {
        &self.a90
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.a45.len()
    }

    /// Number of cells with at least one undefined asymmetry.
    pub fn undefined_cells(&self) -> usize {
        self.undefined_cells
    }

    /// Stable digest of the grid definition, slots and sampled values.
    pub fn grid_hash(&self) -> &str {
        &self.grid_hash
    }

    /// Schema version of the serialized grid.
    pub fn schema_version(&self) -> SchemaVersion {
        self.schema_version
    }

    /// Asymmetries at index `i` of a one-parameter grid.
    pub fn get(&self, i: usize) -> Option<Asymmetries> {
        if self.free_parameters != 1 {
            return None;
        }
        self.cell(i)
    }

    /// Asymmetries at cell `(i, j)` of a two-parameter grid.
    pub fn get2(&self, i: usize, j: usize) -> Option<Asymmetries> {
        let n = self.resolution();
        if self.free_parameters != 2 || i >= n || j >= n {
            return None;
        }
        self.cell(i * n + j)
    }

    /// A45 and A90 along the other parameter while `fixed` stays at grid
    /// index `index`; only defined for two-parameter grids.
    pub fn section(&self, fixed: FreeParameter, index: usize) -> Option<(Vec<f64>, Vec<f64>)> {
        let n = self.resolution();
        if self.free_parameters != 2 || index >= n {
            return None;
        }
        let cells: Vec<usize> = match fixed {
            FreeParameter::Slot1 => (0..n).map(|j| index * n + j).collect(),
            FreeParameter::Slot2 => (0..n).map(|i| i * n + index).collect(),
        };
        Some((
            cells.iter().map(|&cell| self.a45[cell]).collect(),
            cells.iter().map(|&cell| self.a90[cell]).collect(),
        ))
    }

    fn cell(&self, flat: usize) -> Option<Asymmetries> {
        Some(Asymmetries {
            a45: *self.a45.get(flat)?,
            a90: *self.a90.get(flat)?,
        })
    }
}

/// Sweeps the free parameters of `binding` over the arctan grid.
///
/// Each worker evaluates on its own clone of the binding, so the caller's
/// binding is left untouched and the result does not depend on
/// `config.parallelism`.
pub fn sweep<O>(
    binding: &ParameterBinding,
    oracle: &O,
    config: &SweepConfig,
) -> Result<AsymmetryGrid, AngCorrError>
where
    O: CorrelationOracle + ?Sized,
{
    config.validate()?;
    let free_parameters = binding.free_parameter_count();
    if free_parameters == 0 {
        return Err(AngCorrError::InvalidState(
            ErrorInfo::new("no-free-parameters", "sweep requires at least one free parameter")
                .with_hint("bind a cascade step to delta_1"),
        ));
    }

    let grid = ArctanGrid::new(config.resolution, config.max_magnitude)?;
    let deltas = grid.deltas();
    let n = deltas.len();
    let cells = n.pow(free_parameters as u32);
    debug!(
        resolution = n,
        max_magnitude = config.max_magnitude,
        free_parameters,
        parallelism = config.parallelism,
        "starting asymmetry sweep"
    );

    let values_at = |flat: usize| -> Vec<f64> {
        if free_parameters == 1 {
            vec![deltas[flat]]
        } else {
            vec![deltas[flat / n], deltas[flat % n]]
        }
    };
    let evaluate = |working: &mut ParameterBinding, flat: usize| {
        working.set_deltas(&values_at(flat))?;
        Ok::<_, AngCorrError>(compute_asymmetries(oracle, working.cascade()))
    };

    let samples: Vec<Asymmetries> = if config.parallelism > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallelism)
            .build()
            .map_err(pool_error)?;
        pool.install(|| {
            (0..cells)
                .into_par_iter()
                .map_init(|| binding.clone(), |working, flat| evaluate(working, flat))
                .collect::<Result<Vec<_>, _>>()
        })?
    } else {
        let mut working = binding.clone();
        (0..cells)
            .map(|flat| evaluate(&mut working, flat))
            .collect::<Result<Vec<_>, _>>()?
    };

    let a45: Vec<f64> = samples.iter().map(|asy| asy.a45).collect();
    let a90: Vec<f64> = samples.iter().map(|asy| asy.a90).collect();
    let undefined_cells = count_undefined(&a45, &a90);
    if undefined_cells > 0 {
        warn!(
            undefined_cells,
            cells, "asymmetry undefined for some grid cells; they hold NaN"
        );
    }

    let cascade = binding.cascade();
    let structure: Vec<_> = cascade
        .steps()
        .iter()
        .map(|step| {
            let transition = &step.transition;
            (
                transition.primary(),
                transition.two_l(),
                transition.secondary(),
                transition.two_l_prime(),
                step.state,
            )
        })
        .collect();
    let grid_hash = stable_hash_string(&(
        config.resolution,
        config.max_magnitude,
        cascade.initial_state(),
        structure,
        binding.slots(),
        sample_bits(grid.arctan_deltas()),
        sample_bits(&a45),
        sample_bits(&a90),
    ))?;
    info!(cells, free_parameters, grid_hash = %grid_hash, "asymmetry sweep finished");

    Ok(AsymmetryGrid {
        schema_version: SchemaVersion::default(),
        free_parameters,
        grid,
        a45,
        a90,
        undefined_cells,
        grid_hash,
    })
}
