//! Measurement model of the iterative estimator and its analytic Jacobians.
//!
//! Parameter vector `x = [thetaX, thetaY, thetaZ, tX, tY, tZ]`, homography
//! vector `h = [h0 .. h8]` (row-major), measurement vector
//! `[x0, y0, x1, y1, x2, y2, x3, y3]`.

use lighthouse_core::{MatN, PhotodiodeLayout, Projection, Real, VecN};

/// Pose parameters.
pub type Params = VecN<6>;
/// Row-major homography entries.
pub type HomographyVec = VecN<9>;
/// Flattened diode projections.
pub type Measurement = VecN<8>;

/// `g(x)`: pose parameters to homography.
///
/// ```text
/// h0 = cY·cZ − sX·sY·sZ   h1 = −cX·sZ   h2 = tX
/// h3 = cY·sZ + sX·sY·cZ   h4 =  cX·cZ   h5 = tY
/// h6 = cX·sY              h7 = −sX      h8 = −tZ
/// ```
pub fn eval_g(x: &Params) -> HomographyVec {
    let (sx, cx) = x[0].sin_cos();
    let (sy, cy) = x[1].sin_cos();
    let (sz, cz) = x[2].sin_cos();

    HomographyVec::from_column_slice(&[
        cy * cz - sx * sy * sz,
        -cx * sz,
        x[3],
        cy * sz + sx * sy * cz,
        cx * cz,
        x[4],
        cx * sy,
        -sx,
        -x[5],
    ])
}

/// `f(h)`: homography to the projections of all four diodes.
pub fn eval_f(layout: &PhotodiodeLayout, h: &HomographyVec) -> Measurement {
    let mut f = Measurement::zeros();
    for (i, o) in layout.points().iter().enumerate() {
        let denom = h[6] * o.x + h[7] * o.y + h[8];
        f[2 * i] = (h[0] * o.x + h[1] * o.y + h[2]) / denom;
        f[2 * i + 1] = (h[3] * o.x + h[4] * o.y + h[5]) / denom;
    }
    f
}

/// Analytic Jacobian of [`eval_g`] (9×6).
pub fn jacobian_g(x: &Params) -> MatN<9, 6> {
    let (sx, cx) = x[0].sin_cos();
    let (sy, cy) = x[1].sin_cos();
    let (sz, cz) = x[2].sin_cos();

    let mut jg = MatN::<9, 6>::zeros();

    jg[(0, 0)] = -cx * sy * sz;
    jg[(0, 1)] = -sy * cz - sx * cy * sz;
    jg[(0, 2)] = -cy * sz - sx * sy * cz;

    jg[(1, 0)] = sx * sz;
    jg[(1, 2)] = -cx * cz;

    jg[(2, 3)] = 1.0;

    jg[(3, 0)] = cx * sy * cz;
    jg[(3, 1)] = -sy * sz + sx * cy * cz;
    jg[(3, 2)] = cy * cz - sx * sy * sz;

    jg[(4, 0)] = -sx * cz;
    jg[(4, 2)] = -cx * sz;

    jg[(5, 4)] = 1.0;

    jg[(6, 0)] = -sx * sy;
    jg[(6, 1)] = cx * cy;

    jg[(7, 0)] = -cx;

    jg[(8, 5)] = -1.0;

    jg
}

/// Analytic Jacobian of [`eval_f`] (8×9), quotient rule per diode.
pub fn jacobian_f(layout: &PhotodiodeLayout, h: &HomographyVec) -> MatN<8, 9> {
    let mut jf = MatN::<8, 9>::zeros();
    for (i, o) in layout.points().iter().enumerate() {
        let (x, y) = (o.x, o.y);
        let denom = h[6] * x + h[7] * y + h[8];
        let denom_sq = denom * denom;
        let rx = 2 * i;
        let ry = 2 * i + 1;

        let num_x = h[0] * x + h[1] * y + h[2];
        jf[(rx, 0)] = x / denom;
        jf[(rx, 1)] = y / denom;
        jf[(rx, 2)] = 1.0 / denom;
        jf[(rx, 6)] = -x * num_x / denom_sq;
        jf[(rx, 7)] = -y * num_x / denom_sq;
        jf[(rx, 8)] = -num_x / denom_sq;

        let num_y = h[3] * x + h[4] * y + h[5];
        jf[(ry, 3)] = x / denom;
        jf[(ry, 4)] = y / denom;
        jf[(ry, 5)] = 1.0 / denom;
        jf[(ry, 6)] = -x * num_y / denom_sq;
        jf[(ry, 7)] = -y * num_y / denom_sq;
        jf[(ry, 8)] = -num_y / denom_sq;
    }
    jf
}

pub fn measurement(projection: &Projection) -> Measurement {
    Measurement::from_column_slice(&projection.to_flat())
}

/// `‖f(g(x)) − measured‖²`.
pub fn residual(layout: &PhotodiodeLayout, x: &Params, measured: &Measurement) -> Real {
    (measured - eval_f(layout, &eval_g(x))).norm_squared()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lighthouse_core::{synthetic::project, Pose6};

    #[test]
    fn g_embeds_rotation_with_flipped_third_row() {
        let pose = Pose6::from_array([0.3, -0.2, 0.6, 12.0, -7.0, -450.0]);
        let h = eval_g(&pose.to_vector());
        let r = pose.rotation();
        for c in 0..2 {
            assert!((h[c] - r[(0, c)]).abs() < 1e-12);
            assert!((h[3 + c] - r[(1, c)]).abs() < 1e-12);
            assert!((h[6 + c] + r[(2, c)]).abs() < 1e-12);
        }
        assert_eq!(h[2], 12.0);
        assert_eq!(h[5], -7.0);
        assert_eq!(h[8], 450.0);
    }

    #[test]
    fn f_of_g_matches_synthetic_projection() {
        let layout = PhotodiodeLayout::vrduino();
        let pose = Pose6::from_array([0.1, 0.25, -0.15, -30.0, 40.0, -520.0]);
        let f = eval_f(&layout, &eval_g(&pose.to_vector()));
        let expected = measurement(&project(&layout, &pose));
        assert!((f - expected).amax() < 1e-14);
        assert!(residual(&layout, &pose.to_vector(), &expected) < 1e-28);
    }

    #[test]
    fn identity_rotation_jacobian_has_expected_sparsity() {
        let jg = jacobian_g(&Params::zeros());
        assert_eq!(jg[(7, 0)], -1.0);
        assert_eq!(jg[(6, 1)], 1.0);
        assert_eq!(jg[(1, 2)], -1.0);
        assert_eq!(jg[(3, 2)], 1.0);
        assert_eq!(jg[(8, 5)], -1.0);
        assert_eq!(jg.column(3).sum(), 1.0);
    }
}
