//! Direct solvers for linear systems
//!
//! This module provides direct (non-iterative) solvers:
//! - [`solve_gaussian`]: Gaussian elimination with partial pivoting, many right-hand sides
//! - [`lu_factorize`]: LU decomposition with optional partial pivoting

mod elimination;
mod lu;

pub use elimination::solve_gaussian;
pub use lu::{LuFactorization, lu_decompose, lu_factorize, lu_solve, lu_solve_matrix};

use crate::matrix::DenseMatrix;
use crate::traits::RealField;

/// Row in `k..n` holding the largest `|m[i, k]|`, with that magnitude.
///
/// Ties keep the topmost row.
fn find_pivot<T: RealField>(m: &DenseMatrix<T>, k: usize) -> (usize, T) {
    (k + 1..m.rows()).fold((k, m[(k, k)].abs()), |(row, max), i| {
        let v = m[(i, k)].abs();
        if v > max { (i, v) } else { (row, max) }
    })
}
