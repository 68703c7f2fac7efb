//! Euler-angle rotations of detection directions (z-x'-z'' convention).

use serde::{Deserialize, Serialize};

/// Cartesian unit vector.
pub type Vector3 = [f64; 3];

/// Euler angles `(phi, theta, psi)` in the z-x'-z'' convention, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EulerAngles {
    /// First rotation, about the original z axis.
    pub phi: f64,
    /// Second rotation, about the intermediate x' axis.
    pub theta: f64,
    /// Third rotation, about the final z'' axis.
    pub psi: f64,
}

impl EulerAngles {
    /// Creates a new set of Euler angles.
    pub const fn new(phi: f64, theta: f64, psi: f64) -> Self {
        Self { phi, theta, psi }
    }

    /// Angles of the inverse rotation.
    pub fn inverse(&self) -> Self {
        Self::new(-self.psi, -self.theta, -self.phi)
    }

    /// Rotation matrix acting on column vectors.
    pub fn matrix(&self) -> [[f64; 3]; 3] {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_the, cos_the) = self.theta.sin_cos();
        let (sin_psi, cos_psi) = self.psi.sin_cos();
        [
            [
                cos_psi * cos_phi - cos_the * sin_phi * sin_psi,
                cos_psi * sin_phi + cos_the * cos_phi * sin_psi,
                sin_psi * sin_the,
            ],
            [
                -sin_psi * cos_phi - cos_the * sin_phi * cos_psi,
                -sin_psi * sin_phi + cos_the * cos_phi * cos_psi,
                cos_psi * sin_the,
            ],
            [sin_the * sin_phi, -sin_the * cos_phi, cos_the],
        ]
    }

    /// Rotates a cartesian vector.
    pub fn rotate(&self, v: Vector3) -> Vector3 {
        let a = self.matrix();
        [
            a[0][0] * v[0] + a[0][1] * v[1] + a[0][2] * v[2],
            a[1][0] * v[0] + a[1][1] * v[1] + a[1][2] * v[2],
            a[2][0] * v[0] + a[2][1] * v[1] + a[2][2] * v[2],
        ]
    }

    /// Undoes [`EulerAngles::rotate`].
    pub fn rotate_back(&self, v: Vector3) -> Vector3 {
        self.inverse().rotate(v)
    }

    /// Rotates a direction given in spherical coordinates `(theta, phi)`.
    pub fn rotate_direction(&self, theta: f64, phi: f64) -> (f64, f64) {
        to_spherical(self.rotate(to_cartesian(theta, phi)))
    }

    /// Undoes [`EulerAngles::rotate_direction`].
    pub fn rotate_direction_back(&self, theta: f64, phi: f64) -> (f64, f64) {
        to_spherical(self.rotate_back(to_cartesian(theta, phi)))
    }
}

/// Unit vector pointing along the polar angle `theta` and azimuth `phi`.
pub fn to_cartesian(theta: f64, phi: f64) -> Vector3 {
    let (sin_the, cos_the) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    [sin_the * cos_phi, sin_the * sin_phi, cos_the]
}

/// Polar and azimuthal angle of a unit vector; the azimuth lies in `(-pi, pi]`.
pub fn to_spherical(v: Vector3) -> (f64, f64) {
    (v[2].clamp(-1.0, 1.0).acos(), v[1].atan2(v[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_close(a: Vector3, b: Vector3) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-12, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_minus_y() {
        let euler = EulerAngles::new(FRAC_PI_2, 0.0, 0.0);
        assert_close(euler.rotate([1.0, 0.0, 0.0]), [0.0, -1.0, 0.0]);
    }

    #[test]
    fn rotate_back_restores_axes() {
        let euler = EulerAngles::new(0.3, 1.1, -2.4);
        for axis in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] {
            assert_close(euler.rotate_back(euler.rotate(axis)), axis);
        }
    }

    #[test]
    fn spherical_round_trip_keeps_direction() {
        let (theta, phi) = to_spherical(to_cartesian(0.25 * PI, 0.75 * PI));
        assert!((theta - 0.25 * PI).abs() < 1e-12);
        assert!((phi - 0.75 * PI).abs() < 1e-12);
    }
}
