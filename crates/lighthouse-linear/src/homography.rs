use lighthouse_core::{
    from_homogeneous, solve, to_homogeneous, LinalgError, Mat3, MatN, PhotodiodeLayout,
    Projection, Pt2, Real, VecN,
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HomographyError {
    #[error("homography system is singular: {0}")]
    SingularSystem(#[from] LinalgError),
}

/// Build the DLT system `A h = b` for the homography with `H[2][2] = 1`.
///
/// Each diode `(ox, oy)` measured at `(bx, by)` contributes the rows
///
/// ```text
/// [ ox  oy  1   0   0   0  -ox*bx  -oy*bx ]   = bx
/// [ 0   0   0   ox  oy  1  -ox*by  -oy*by ]   = by
/// ```
pub fn dlt_system(layout: &PhotodiodeLayout, projection: &Projection) -> (MatN<8, 8>, VecN<8>) {
    let mut a = MatN::<8, 8>::zeros();
    let mut b = VecN::<8>::zeros();

    for (i, (o, m)) in layout
        .points()
        .iter()
        .zip(projection.points().iter())
        .enumerate()
    {
        let r0 = 2 * i;
        let r1 = 2 * i + 1;

        a[(r0, 0)] = o.x;
        a[(r0, 1)] = o.y;
        a[(r0, 2)] = 1.0;
        a[(r0, 6)] = -o.x * m.x;
        a[(r0, 7)] = -o.y * m.x;

        a[(r1, 3)] = o.x;
        a[(r1, 4)] = o.y;
        a[(r1, 5)] = 1.0;
        a[(r1, 6)] = -o.x * m.y;
        a[(r1, 7)] = -o.y * m.y;

        b[r0] = m.x;
        b[r1] = m.y;
    }

    (a, b)
}

/// Estimate H such that `projection ~ H · (ox, oy, 1)`, normalised to `H[2][2] = 1`.
pub fn solve_homography(
    layout: &PhotodiodeLayout,
    projection: &Projection,
) -> Result<Mat3, HomographyError> {
    let (a, b) = dlt_system(layout, projection);
    let h = solve(a, &b)?;
    Ok(Mat3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0))
}

/// Map an object-plane point through `h` with full projective division.
pub fn apply_homography(h: &Mat3, p: &Pt2) -> Pt2 {
    from_homogeneous(&(h * to_homogeneous(p)))
}

/// Sum of squared distances between reprojected diodes and their measurements.
pub fn reprojection_residual(
    h: &Mat3,
    layout: &PhotodiodeLayout,
    projection: &Projection,
) -> Real {
    layout
        .points()
        .iter()
        .zip(projection.points().iter())
        .map(|(o, m)| (apply_homography(h, o) - m).norm_squared())
        .sum()
}
