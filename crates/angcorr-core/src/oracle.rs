//! Contract for the external angular-correlation evaluator.

use crate::cascade::Cascade;
use crate::rotation::EulerAngles;

/// Pure evaluator of the gamma-gamma angular correlation `W(theta, phi)`.
///
/// Implementations must be deterministic and normalised such that the
/// integral of `W` over the full sphere equals `4 pi`. Angles are in radians;
/// `theta` is the polar angle with respect to the beam axis and `phi` the
/// azimuth measured from the polarisation plane.
pub trait CorrelationOracle: Send + Sync {
    /// Evaluates the correlation for the currently bound cascade.
    fn evaluate(&self, theta: f64, phi: f64, cascade: &Cascade) -> f64;

    /// Evaluates the correlation with the detection geometry rotated by
    /// `euler`. The angles `theta` and `phi` stay defined in the original
    /// frame; the direction is rotated back before evaluation, so the
    /// normalisation is unchanged.
    fn evaluate_rotated(
        &self,
        theta: f64,
        phi: f64,
        euler: &EulerAngles,
        cascade: &Cascade,
    ) -> f64 {
        let (theta_p, phi_p) = euler.rotate_direction_back(theta, phi);
        self.evaluate(theta_p, phi_p, cascade)
    }
}

impl<F> CorrelationOracle for F
where
    F: Fn(f64, f64, &Cascade) -> f64 + Send + Sync,
{
    fn evaluate(&self, theta: f64, phi: f64, cascade: &Cascade) -> f64 {
        self(theta, phi, cascade)
    }
}
