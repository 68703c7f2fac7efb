use std::fmt;

use angcorr_core::errors::{AngCorrError, ErrorInfo};
use serde::{Deserialize, Serialize};

use crate::intervals::values_in_range;

fn band_error(code: &str, message: impl Into<String>) -> AngCorrError {
    AngCorrError::InvalidArgument(ErrorInfo::new(code, message))
}

/// Measured value with asymmetric uncertainties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    /// Central value.
    pub mean: f64,
    /// Distance from the mean to the lower bound.
    pub sigma_low: f64,
    /// Distance from the mean to the upper bound.
    pub sigma_up: f64,
}

impl ConfidenceBand {
    /// Creates a validated band.
    pub fn new(mean: f64, sigma_low: f64, sigma_up: f64) -> Result<Self, AngCorrError> {
        let band = Self {
            mean,
            sigma_low,
            sigma_up,
        };
        band.validate()?;
        Ok(band)
    }

    /// Requires finite values and non-negative uncertainties.
    pub fn validate(&self) -> Result<(), AngCorrError> {
        if !(self.mean.is_finite() && self.sigma_low.is_finite() && self.sigma_up.is_finite()) {
            return Err(band_error(
                "invalid-confidence-band",
                "mean and uncertainties must be finite",
            ));
        }
        if self.sigma_low < 0.0 || self.sigma_up < 0.0 {
            return Err(AngCorrError::InvalidArgument(
                ErrorInfo::new("invalid-confidence-band", "uncertainties must be non-negative")
                    .with_context("sigma_low", self.sigma_low)
                    .with_context("sigma_up", self.sigma_up),
            ));
        }
        Ok(())
    }

    /// Lower bound `mean - sigma_low`.
    pub fn lower(&self) -> f64 {
        self.mean - self.sigma_low
    }

    /// Upper bound `mean + sigma_up`.
    pub fn upper(&self) -> f64 {
        self.mean + self.sigma_up
    }

    /// Inclusive membership test; `NaN` is never contained.
    pub fn contains(&self, value: f64) -> bool {
        self.lower() <= value && value <= self.upper()
    }

    /// Membership mask over `values`.
    pub fn mask(&self, values: &[f64]) -> Vec<bool> {
        values_in_range(values, self.mean, self.sigma_low, self.sigma_up)
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:+.2e} - {:.2e} + {:.2e}",
            self.mean, self.sigma_low, self.sigma_up
        )
    }
}
