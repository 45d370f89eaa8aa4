//! Fixed-size dense linear algebra kernel.
//!
//! All systems solved per frame are tiny (8×8 for the homography, 6×6 for
//! the LM normal equations), so everything here works on stack-allocated
//! [`MatN`] matrices with compile-time shapes. Dimension mismatches are
//! therefore rejected by the type checker rather than at run time.
//!
//! Inversion uses Gauss-Jordan elimination with partial pivoting. It takes
//! the input by value and hands back a fresh inverse, so callers never
//! observe a half-eliminated matrix.

use crate::{MatN, Real, VecN};
use thiserror::Error;

/// Failure of a kernel operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinalgError {
    /// No usable pivot was found while eliminating `column`.
    #[error("matrix is singular (no usable pivot in column {column})")]
    Singular { column: usize },
}

/// Dense matrix product `A (m×n) · B (n×p)`.
pub fn multiply<const M: usize, const N: usize, const P: usize>(
    a: &MatN<M, N>,
    b: &MatN<N, P>,
) -> MatN<M, P> {
    a * b
}

/// Matrix transpose `Aᵗ`.
pub fn transpose<const M: usize, const N: usize>(a: &MatN<M, N>) -> MatN<N, M> {
    a.transpose()
}

/// Invert a square matrix with Gauss-Jordan elimination and partial pivoting.
///
/// A pivot is rejected when its magnitude does not exceed
/// `N · ε · max|a_ij|`, or when it is not finite. An all-zero matrix is
/// always singular.
///
/// # Errors
///
/// [`LinalgError::Singular`] with the column at which elimination stalled.
pub fn invert<const N: usize>(a: MatN<N, N>) -> Result<MatN<N, N>, LinalgError> {
    let mut a = a;
    let mut inv = MatN::<N, N>::identity();
    let tol = a.amax() * (N as Real) * Real::EPSILON;

    for col in 0..N {
        let mut pivot_row = col;
        let mut pivot_abs = a[(col, col)].abs();
        for r in (col + 1)..N {
            let v = a[(r, col)].abs();
            if v > pivot_abs {
                pivot_row = r;
                pivot_abs = v;
            }
        }
        if !pivot_abs.is_finite() || pivot_abs <= tol {
            return Err(LinalgError::Singular { column: col });
        }
        if pivot_row != col {
            a.swap_rows(col, pivot_row);
            inv.swap_rows(col, pivot_row);
        }

        let pivot = a[(col, col)];
        for c in 0..N {
            a[(col, c)] /= pivot;
            inv[(col, c)] /= pivot;
        }

        for r in 0..N {
            if r == col {
                continue;
            }
            let factor = a[(r, col)];
            if factor == 0.0 {
                continue;
            }
            for c in 0..N {
                let a_pc = a[(col, c)];
                let inv_pc = inv[(col, c)];
                a[(r, c)] -= factor * a_pc;
                inv[(r, c)] -= factor * inv_pc;
            }
        }
    }

    Ok(inv)
}

/// Solve `A x = b` through [`invert`].
pub fn solve<const N: usize>(a: MatN<N, N>, b: &VecN<N>) -> Result<VecN<N>, LinalgError> {
    Ok(invert(a)? * b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_conditioned_6x6() -> MatN<6, 6> {
        MatN::<6, 6>::from_fn(|r, c| {
            let base = ((r * 7 + c * 3) % 11) as Real - 5.0;
            if r == c {
                base + 20.0
            } else {
                base * 0.5
            }
        })
    }

    #[test]
    fn multiply_matches_hand_computed_product() {
        let a = MatN::<2, 3>::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let b = MatN::<3, 2>::new(7.0, 8.0, 9.0, 10.0, 11.0, 12.0);
        let c = multiply(&a, &b);
        assert_eq!(c, MatN::<2, 2>::new(58.0, 64.0, 139.0, 154.0));
    }

    #[test]
    fn transpose_swaps_shape() {
        let a = MatN::<2, 3>::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let t = transpose(&a);
        assert_eq!(t[(2, 0)], 3.0);
        assert_eq!(t[(0, 1)], 4.0);
        assert_eq!(transpose(&t), a);
    }

    #[test]
    fn invert_twice_recovers_input() {
        let m = well_conditioned_6x6();
        let inv = invert(m).unwrap();
        let back = invert(inv).unwrap();
        assert!((back - m).amax() < 1e-10, "round trip error {}", (back - m).amax());
        assert!((m * inv - MatN::<6, 6>::identity()).amax() < 1e-12);
    }

    #[test]
    fn invert_requires_row_exchange() {
        let m = MatN::<3, 3>::new(0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 2.0);
        let inv = invert(m).unwrap();
        let expected = MatN::<3, 3>::new(0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.5);
        assert!((inv - expected).amax() < 1e-15);
    }

    #[test]
    fn invert_matches_nalgebra_on_8x8() {
        let m = MatN::<8, 8>::from_fn(|r, c| {
            let v = ((r + 1) * (c + 2)) as Real;
            if r == c {
                v + 10.0
            } else {
                (v * 0.37).sin()
            }
        });
        let ours = invert(m).unwrap();
        let reference = m.try_inverse().unwrap();
        assert!((ours - reference).amax() < 1e-10);
    }

    #[test]
    fn zero_row_is_singular() {
        let mut m = well_conditioned_6x6();
        m.row_mut(3).fill(0.0);
        assert!(matches!(invert(m), Err(LinalgError::Singular { .. })));
    }

    #[test]
    fn rank_deficient_is_singular() {
        let m = MatN::<2, 2>::new(1.0, 2.0, 2.0, 4.0);
        assert_eq!(invert(m), Err(LinalgError::Singular { column: 1 }));
        assert!(invert(MatN::<4, 4>::zeros()).is_err());
    }

    #[test]
    fn non_finite_entries_are_rejected() {
        let mut m = MatN::<3, 3>::identity();
        m[(1, 1)] = Real::NAN;
        assert!(invert(m).is_err());
    }

    #[test]
    fn solve_recovers_known_solution() {
        let a = well_conditioned_6x6();
        let x = VecN::<6>::new(1.0, -2.0, 3.0, -4.0, 5.0, -6.0);
        let b = a * x;
        let x_hat = solve(a, &b).unwrap();
        assert!((x_hat - x).amax() < 1e-12);
    }
}
