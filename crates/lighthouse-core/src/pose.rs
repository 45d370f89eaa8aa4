//! Six-parameter pose used by the iterative estimator.

use crate::{Mat3, Real, Vec3, VecN};
use nalgebra::{Rotation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

/// Rotation angles and translation of the tracked object in the lighthouse
/// frame, packed as `[thetaX, thetaY, thetaZ, tX, tY, tZ]`.
///
/// The rotation is composed as `Rz(thetaZ) · Rx(thetaX) · Ry(thetaY)`. The
/// object sits in front of the lighthouse at negative `tZ`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose6 {
    /// `(thetaX, thetaY, thetaZ)` in radians.
    pub angles: Vec3,
    /// `(tX, tY, tZ)` in layout units.
    pub translation: Vec3,
}

impl Pose6 {
    pub fn new(angles: Vec3, translation: Vec3) -> Self {
        Self {
            angles,
            translation,
        }
    }

    /// Pose with zero rotation at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self::new(Vec3::zeros(), position)
    }

    pub fn from_array(x: [Real; 6]) -> Self {
        Self::new(Vec3::new(x[0], x[1], x[2]), Vec3::new(x[3], x[4], x[5]))
    }

    pub fn to_array(&self) -> [Real; 6] {
        let (a, t) = (&self.angles, &self.translation);
        [a.x, a.y, a.z, t.x, t.y, t.z]
    }

    pub fn from_vector(x: &VecN<6>) -> Self {
        Self::new(x.fixed_rows::<3>(0).into_owned(), x.fixed_rows::<3>(3).into_owned())
    }

    pub fn to_vector(&self) -> VecN<6> {
        VecN::<6>::from_column_slice(&self.to_array())
    }

    /// Rotation matrix `Rz · Rx · Ry`.
    pub fn rotation(&self) -> Mat3 {
        let rx = Rotation3::from_axis_angle(&Vec3::x_axis(), self.angles.x);
        let ry = Rotation3::from_axis_angle(&Vec3::y_axis(), self.angles.y);
        let rz = Rotation3::from_axis_angle(&Vec3::z_axis(), self.angles.z);
        (rz * rx * ry).into_inner()
    }

    pub fn quaternion(&self) -> UnitQuaternion<Real> {
        UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(self.rotation()))
    }

    /// Map an object-frame point into the lighthouse frame.
    pub fn transform(&self, p: &Vec3) -> Vec3 {
        self.rotation() * p + self.translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_and_vector_layouts_agree() {
        let pose = Pose6::from_array([0.1, -0.2, 0.3, 10.0, -20.0, -500.0]);
        assert_eq!(pose.to_vector()[4], -20.0);
        assert_eq!(Pose6::from_vector(&pose.to_vector()), pose);
        assert_eq!(pose.to_array()[2], 0.3);
    }

    #[test]
    fn rotation_composes_z_x_y() {
        let (ax, ay, az) = (0.3_f64, -0.4_f64, 0.7_f64);
        let r = Pose6::new(Vec3::new(ax, ay, az), Vec3::zeros()).rotation();
        let (sx, cx) = ax.sin_cos();
        let (sy, cy) = ay.sin_cos();
        let (sz, cz) = az.sin_cos();
        assert!((r[(0, 0)] - (cy * cz - sx * sy * sz)).abs() < 1e-12);
        assert!((r[(0, 1)] + cx * sz).abs() < 1e-12);
        assert!((r[(1, 0)] - (cy * sz + sx * sy * cz)).abs() < 1e-12);
        assert!((r[(1, 1)] - cx * cz).abs() < 1e-12);
        assert!((r[(2, 0)] + cx * sy).abs() < 1e-12);
        assert!((r[(2, 1)] - sx).abs() < 1e-12);
    }

    #[test]
    fn quaternion_matches_rotation() {
        let pose = Pose6::from_array([0.2, 0.1, -0.5, 0.0, 0.0, -300.0]);
        let q = pose.quaternion();
        let diff = q.to_rotation_matrix().into_inner() - pose.rotation();
        assert!(diff.amax() < 1e-12);
    }
}
