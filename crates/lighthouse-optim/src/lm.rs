//! Fixed-iteration Levenberg-Marquardt refinement of the 6-DoF pose.
//!
//! Every call runs exactly `max_iters` damped Gauss-Newton steps
//!
//! ```text
//! Δx = (JᵗJ + λ·diag(JᵗJ))⁻¹ · Jᵗ · (measured − f(g(x)))
//! ```
//!
//! with a constant multiplicative damping `λ`. A step whose normal equations
//! cannot be inverted is skipped and clears [`LmReport::success`], but the
//! remaining iterations still run: later steps may recover from a transient
//! degeneracy.

use crate::model::{
    eval_f, eval_g, jacobian_f, jacobian_g, measurement, residual, Measurement, Params,
};
use lighthouse_core::{
    invert, multiply, transpose, LinalgError, PhotodiodeLayout, Pose6, Projection, Real,
};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Options for [`LevenbergMarquardtPose`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LmOptions {
    /// Multiplicative damping applied to the diagonal of `JᵗJ`.
    pub lambda: Real,
    /// Number of iterations run per call.
    pub max_iters: usize,
}

impl Default for LmOptions {
    fn default() -> Self {
        Self {
            lambda: 0.01,
            max_iters: 20,
        }
    }
}

/// Outcome of one [`LevenbergMarquardtPose::compute_pose`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmReport {
    /// Pose after the last iteration, returned even when `success` is false.
    pub pose: Pose6,
    /// Squared reprojection error before the first step and after every step
    /// (`max_iters + 1` entries).
    pub residuals: Vec<Real>,
    /// `false` if any iteration hit singular normal equations.
    pub success: bool,
}

impl LmReport {
    pub fn initial_residual(&self) -> Real {
        self.residuals.first().copied().unwrap_or(Real::NAN)
    }

    pub fn final_residual(&self) -> Real {
        self.residuals.last().copied().unwrap_or(Real::NAN)
    }
}

/// Levenberg-Marquardt pose estimator for a fixed photodiode layout.
#[derive(Debug, Clone)]
pub struct LevenbergMarquardtPose {
    layout: PhotodiodeLayout,
    options: LmOptions,
}

impl LevenbergMarquardtPose {
    pub fn new(layout: PhotodiodeLayout) -> Self {
        Self::with_options(layout, LmOptions::default())
    }

    pub fn with_options(layout: PhotodiodeLayout, options: LmOptions) -> Self {
        Self { layout, options }
    }

    pub fn layout(&self) -> &PhotodiodeLayout {
        &self.layout
    }

    pub fn options(&self) -> &LmOptions {
        &self.options
    }

    /// Refine `seed` against one frame of projections.
    ///
    /// The seed can come from the homography estimate, the previous frame or
    /// an arbitrary guess; nothing is carried over between calls.
    pub fn compute_pose(&self, projection: &Projection, seed: &Pose6) -> LmReport {
        let measured = measurement(projection);
        let mut x = seed.to_vector();
        let mut success = true;

        let mut residuals = Vec::with_capacity(self.options.max_iters + 1);
        residuals.push(residual(&self.layout, &x, &measured));

        for it in 1..=self.options.max_iters {
            match self.delta_x(&x, &measured) {
                Ok(delta) => x += delta,
                Err(err) => {
                    debug!("lm iteration {it}: step skipped, {err}");
                    success = false;
                }
            }
            let r = residual(&self.layout, &x, &measured);
            trace!("lm iteration {it}: residual {r:.6e}");
            residuals.push(r);
        }

        LmReport {
            pose: Pose6::from_vector(&x),
            residuals,
            success,
        }
    }

    /// Damped Gauss-Newton step at `x`.
    pub fn delta_x(&self, x: &Params, measured: &Measurement) -> Result<Params, LinalgError> {
        let h = eval_g(x);
        let f = eval_f(&self.layout, &h);
        let j = multiply(&jacobian_f(&self.layout, &h), &jacobian_g(x));

        let jt = transpose(&j);
        let mut jtj = multiply(&jt, &j);
        for i in 0..6 {
            jtj[(i, i)] += self.options.lambda * jtj[(i, i)];
        }
        let jtj_inv = invert(jtj)?;

        Ok(multiply(&multiply(&jtj_inv, &jt), &(measured - f)))
    }
}
