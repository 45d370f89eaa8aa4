use crate::{reprojection_residual, solve_homography, HomographyError};
use lighthouse_core::{Mat3, PhotodiodeLayout, Pose6, Projection, Real, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

/// Options for [`HomographyPose`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomographyOptions {
    /// Weight `α` of the previous depth in `z = α·z_prior + (1-α)·z`.
    pub smoothing: Real,
}

impl Default for HomographyOptions {
    fn default() -> Self {
        Self { smoothing: 0.8 }
    }
}

/// Result of one [`HomographyPose::compute_position`] call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomographyEstimate {
    /// Plane-to-sensor homography with `H[2][2] = 1`.
    pub homography: Mat3,
    /// Position in the lighthouse frame; `z` is smoothed across frames.
    pub position: Vec3,
    /// Normalisation factor `s`; the unsmoothed depth is `-s`.
    pub scale: Real,
    /// Sum of squared reprojection errors over the four diodes.
    pub residual: Real,
}

impl HomographyEstimate {
    /// Full pose read back from the homography, used to seed iterative refinement.
    ///
    /// The rotation columns are `s·(h0, h3, -h6)` and `s·(h1, h4, -h7)`, which
    /// fixes the angles under the `Rz · Rx · Ry` convention. Translation uses
    /// the unsmoothed depth.
    pub fn pose_seed(&self) -> Pose6 {
        let h = &self.homography;
        let s = self.scale;
        let theta_x = (-s * h[(2, 1)]).clamp(-1.0, 1.0).asin();
        let theta_z = (-h[(0, 1)]).atan2(h[(1, 1)]);
        let (sz, cz) = theta_z.sin_cos();
        let theta_y = h[(2, 0)].atan2(theta_x.cos() * (h[(0, 0)] * cz + h[(1, 0)] * sz));
        Pose6::new(
            Vec3::new(theta_x, theta_y, theta_z),
            Vec3::new(self.position.x, self.position.y, -s),
        )
    }
}

/// Position `(s·h2, s·h5, -s)` and scale `s` of a normalised homography.
///
/// `s = 2 / (‖(h0,h3,h6)‖ + ‖(h1,h4,h7)‖)`: both column norms equal `1/|z|`
/// for a rigid motion, averaging them damps noise.
pub fn position_from_homography(h: &Mat3) -> (Vec3, Real) {
    let norm1 = h.column(0).norm();
    let norm2 = h.column(1).norm();
    let s = 2.0 / (norm1 + norm2);
    (Vec3::new(s * h[(0, 2)], s * h[(1, 2)], -s), s)
}

/// Closed-form position estimator with depth smoothing.
///
/// Owns the only cross-frame state of the homography path: the previous
/// smoothed depth.
#[derive(Debug, Clone)]
pub struct HomographyPose {
    layout: PhotodiodeLayout,
    options: HomographyOptions,
    prior_z: Real,
}

impl HomographyPose {
    pub fn new(layout: PhotodiodeLayout) -> Self {
        Self::with_options(layout, HomographyOptions::default())
    }

    pub fn with_options(layout: PhotodiodeLayout, options: HomographyOptions) -> Self {
        Self {
            layout,
            options,
            prior_z: 0.0,
        }
    }

    pub fn layout(&self) -> &PhotodiodeLayout {
        &self.layout
    }

    pub fn options(&self) -> &HomographyOptions {
        &self.options
    }

    /// Smoothed depth carried into the next frame.
    pub fn prior_z(&self) -> Real {
        self.prior_z
    }

    pub fn set_prior_z(&mut self, z: Real) {
        self.prior_z = z;
    }

    pub fn reset(&mut self) {
        self.prior_z = 0.0;
    }

    /// Estimate the object position from one frame of projections.
    ///
    /// On a singular DLT system nothing is updated and the previous depth is
    /// kept for the next frame.
    pub fn compute_position(
        &mut self,
        projection: &Projection,
    ) -> Result<HomographyEstimate, HomographyError> {
        let homography = solve_homography(&self.layout, projection).map_err(|err| {
            debug!("homography estimate skipped: {err}");
            err
        })?;

        let (mut position, scale) = position_from_homography(&homography);
        let alpha = self.options.smoothing;
        position.z = alpha * self.prior_z + (1.0 - alpha) * position.z;
        self.prior_z = position.z;

        let residual = reprojection_residual(&homography, &self.layout, projection);

        Ok(HomographyEstimate {
            homography,
            position,
            scale,
            residual,
        })
    }
}
