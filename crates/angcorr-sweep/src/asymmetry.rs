use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use angcorr_core::errors::{AngCorrError, ErrorInfo};
use angcorr_core::{Cascade, CorrelationOracle};
use serde::{Deserialize, Serialize};

/// Azimuthal asymmetries at polar angles of 45 and 90 degrees.
///
/// A component is `NaN` when both intensities entering it sum to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Asymmetries {
    /// Asymmetry at `theta = pi/4`.
    pub a45: f64,
    /// Asymmetry at `theta = pi/2`.
    pub a90: f64,
}

impl Asymmetries {
    /// Whether both components are defined.
    pub fn is_defined(&self) -> bool {
        !self.a45.is_nan() && !self.a90.is_nan()
    }

    /// Converts undefined components into a domain error.
    pub fn checked(self) -> Result<Self, AngCorrError> {
        for (name, value) in [("a45", self.a45), ("a90", self.a90)] {
            if value.is_nan() {
                return Err(AngCorrError::Domain(
                    ErrorInfo::new(
                        "zero-denominator",
                        "intensities at phi = 0 and phi = pi/2 sum to zero",
                    )
                    .with_context("observable", name),
                ));
            }
        }
        Ok(self)
    }
}

/// Normalised difference `(w_0 - w_90) / (w_0 + w_90)`, `NaN` on a zero sum.
pub fn asymmetry_ratio(w_0: f64, w_90: f64) -> f64 {
    let sum = w_0 + w_90;
    if sum == 0.0 {
        return f64::NAN;
    }
    (w_0 - w_90) / sum
}

/// Computes both asymmetries with exactly four oracle calls.
pub fn compute_asymmetries<O>(oracle: &O, cascade: &Cascade) -> Asymmetries
where
    O: CorrelationOracle + ?Sized,
{
    let w_45_0 = oracle.evaluate(FRAC_PI_4, 0.0, cascade);
    let w_45_90 = oracle.evaluate(FRAC_PI_4, FRAC_PI_2, cascade);
    let w_90_0 = oracle.evaluate(FRAC_PI_2, 0.0, cascade);
    let w_90_90 = oracle.evaluate(FRAC_PI_2, FRAC_PI_2, cascade);

    Asymmetries {
        a45: asymmetry_ratio(w_45_0, w_45_90),
        a90: asymmetry_ratio(w_90_0, w_90_90),
    }
}
