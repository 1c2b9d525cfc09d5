//! Gaussian elimination solver
//!
//! Solves `A·X = B` for one or more right-hand-side columns with forward
//! elimination (partial pivoting) followed by back substitution.

use super::find_pivot;
use crate::error::{Result, SolveError};
use crate::matrix::DenseMatrix;
use crate::traits::RealField;

/// Solve `A·X = B` by Gaussian elimination with partial pivoting
///
/// `a` must be square `n×n` and `b` must be `n×p`; the solution is `n×p`.
/// Both inputs are copied, never modified.
///
/// Returns [`SolveError::Singular`] when a pivot column is entirely zero.
///
/// # Panics
///
/// Panics if `a` is not square or `b.rows() != a.rows()`.
pub fn solve_gaussian<T: RealField>(
    a: &DenseMatrix<T>,
    b: &DenseMatrix<T>,
) -> Result<DenseMatrix<T>> {
    assert!(
        a.is_square(),
        "Gaussian elimination requires a square matrix, got {}×{}",
        a.rows(),
        a.cols()
    );
    assert_eq!(b.rows(), a.rows(), "B.rows must equal A.rows");

    let n = a.rows();
    let p = b.cols();
    let mut a = a.clone();
    let mut r = b.clone();

    for k in 0..n {
        let (pivot_row, max_val) = find_pivot(&a, k);
        if max_val.is_zero() {
            return Err(SolveError::Singular { pivot: k });
        }

        if pivot_row != k {
            a.swap_rows(k, pivot_row);
            r.swap_rows(k, pivot_row);
        }

        let akk = a[(k, k)];
        for i in (k + 1)..n {
            let m = a[(i, k)] / akk;
            if m.is_zero() {
                continue;
            }
            a[(i, k)] = T::zero();
            for j in (k + 1)..n {
                let akj = a[(k, j)];
                a[(i, j)] -= m * akj;
            }
            for c in 0..p {
                let rkc = r[(k, c)];
                r[(i, c)] -= m * rkc;
            }
        }
    }

    let mut x = DenseMatrix::zeros(n, p);
    for i in (0..n).rev() {
        let aii = a[(i, i)];
        if aii.is_zero() {
            return Err(SolveError::Singular { pivot: i });
        }
        for c in 0..p {
            let mut s = r[(i, c)];
            for j in (i + 1)..n {
                s -= a[(i, j)] * x[(j, c)];
            }
            x[(i, c)] = s / aii;
        }
    }

    Ok(x)
}

impl<T: RealField> DenseMatrix<T> {
    /// Solve `self · X = b` by Gaussian elimination, see [`solve_gaussian`]
    pub fn solve_gaussian(&self, b: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        solve_gaussian(self, b)
    }
}
