//! Dense linear algebra kernel
//!
//! This crate provides a row-major dense matrix together with a small set of
//! direct solvers for square and rectangular systems.
//!
//! # Features
//!
//! - **Dense Matrices**: [`DenseMatrix`] over any numeric scalar, with arithmetic and determinants
//! - **Direct Solvers**: Gaussian elimination with many right-hand sides, LU with row permutation
//! - **Eigensolvers**: Jacobi rotations for symmetric matrices, closed form for 2×2
//! - **Pseudoinverse**: Moore–Penrose with rank truncation, via the eigendecomposition of `AᵀA`
//! - **Generic Scalar Types**: Works with f64 and f32 (integers for exact operations)
//!
//! # Example
//!
//! ```
//! use math_audio_dense::{DenseMatrix, SolveError};
//!
//! let a = DenseMatrix::from_rows(vec![vec![4.0_f64, 3.0], vec![6.0, 3.0]]);
//! let b = DenseMatrix::column_vector(&[1.0, 1.0]);
//!
//! let x = a.solve_gaussian(&b)?;
//! assert!((x[(1, 0)] - 1.0 / 3.0).abs() < 1e-12);
//!
//! let lu = a.lu_decomposition(true)?;
//! assert!((lu.determinant() - a.determinant()).abs() < 1e-12);
//! # Ok::<(), SolveError>(())
//! ```

pub mod direct;
pub mod eigen;
pub mod error;
pub mod matrix;
pub mod parallel;
pub mod pseudoinverse;
pub mod traits;

// Re-export main types
pub use error::{Result, SolveError};
pub use matrix::{DenseMatrix, Vector2};
pub use traits::{RealField, Scalar};

// Re-export direct solvers
pub use direct::{
    LuFactorization, lu_decompose, lu_factorize, lu_solve, lu_solve_matrix, solve_gaussian,
};

// Re-export eigensolvers
pub use eigen::{Eigen2x2, JacobiConfig, SymmetricEigen, eigen_2x2, symmetric_eigen};

pub use pseudoinverse::{PseudoinverseConfig, pseudoinverse};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
