//! Finite-difference validation of the analytic Jacobians in [`crate::model`].
//!
//! Only compiled for tests or with the `jacobian-check` feature; the
//! estimation path never calls into it.

use crate::model::{eval_f, eval_g, jacobian_f, jacobian_g, HomographyVec, Params};
use lighthouse_core::{MatN, PhotodiodeLayout, Real};
use log::info;
use rand::Rng;
use serde::Serialize;

/// Forward-difference step for angles and translations.
pub const G_STEP: Real = 0.01;
/// Forward-difference step for homography entries.
pub const F_STEP: Real = 1e-6;

/// One-sided numeric Jacobian of [`eval_g`].
pub fn numeric_jacobian_g(x: &Params, step: Real) -> MatN<9, 6> {
    let h_x = eval_g(x);
    let mut jg = MatN::<9, 6>::zeros();
    for i in 0..6 {
        let mut xx = *x;
        xx[i] += step;
        jg.set_column(i, &((eval_g(&xx) - h_x) / step));
    }
    jg
}

/// One-sided numeric Jacobian of [`eval_f`].
pub fn numeric_jacobian_f(layout: &PhotodiodeLayout, h: &HomographyVec, step: Real) -> MatN<8, 9> {
    let f_h = eval_f(layout, h);
    let mut jf = MatN::<8, 9>::zeros();
    for i in 0..9 {
        let mut hh = *h;
        hh[i] += step;
        jf.set_column(i, &((eval_f(layout, &hh) - f_h) / step));
    }
    jf
}

/// L2 (Frobenius) norm of the elementwise difference.
pub fn l2_error<const R: usize, const C: usize>(a: &MatN<R, C>, b: &MatN<R, C>) -> Real {
    (a - b).norm()
}

/// Analytic-vs-numeric discrepancies for one random test point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JacobianCheck {
    pub error_g: Real,
    pub error_f: Real,
}

/// Random pose with angles in `[0, 1)` rad, placed well in front of the
/// lighthouse relative to the layout's extent so `f` stays far from its pole.
pub fn random_params<R: Rng>(layout: &PhotodiodeLayout, rng: &mut R) -> Params {
    let extent = layout
        .points()
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(1.0, Real::max);
    Params::new(
        rng.random::<Real>(),
        rng.random::<Real>(),
        rng.random::<Real>(),
        rng.random_range(-2.0 * extent..2.0 * extent),
        rng.random_range(-2.0 * extent..2.0 * extent),
        rng.random_range(-14.0 * extent..-6.0 * extent),
    )
}

/// Compare both analytic Jacobians with their numeric counterparts at a
/// random point and log the errors.
pub fn check_jacobians<R: Rng>(layout: &PhotodiodeLayout, rng: &mut R) -> JacobianCheck {
    let x = random_params(layout, rng);
    let error_g = l2_error(&jacobian_g(&x), &numeric_jacobian_g(&x, G_STEP));

    let h = eval_g(&x);
    let error_f = l2_error(&jacobian_f(layout, &h), &numeric_jacobian_f(layout, &h, F_STEP));

    info!("jacobian check: error Jg {error_g:.9e}, error Jf {error_f:.9e}");
    JacobianCheck { error_g, error_f }
}
