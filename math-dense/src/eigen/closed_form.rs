//! Closed-form eigendecomposition of 2×2 matrices

use crate::error::{Result, SolveError};
use crate::matrix::DenseMatrix;
use crate::traits::RealField;
use serde::{Deserialize, Serialize};

/// Eigenpairs of a real 2×2 matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Eigen2x2<T> {
    /// `(λ1, λ2)` with `λ1 ≥ λ2`
    pub values: (T, T),
    /// Column `i` is the eigenvector of the i-th eigenvalue
    pub vectors: DenseMatrix<T>,
}

/// Eigenvalues and eigenvectors of a real 2×2 matrix
///
/// The matrix need not be symmetric. Eigenvalues come from the characteristic
/// polynomial `λ² − tr·λ + det`; each eigenvector is taken from the larger
/// row (by L1 norm) of `A − λI` and normalized to unit length. A zero
/// candidate (`A = λI`) is returned unnormalized.
///
/// Returns [`SolveError::ComplexEigenvalues`] when the discriminant is negative.
///
/// # Panics
///
/// Panics if `a` is not 2×2.
pub fn eigen_2x2<T: RealField>(a: &DenseMatrix<T>) -> Result<Eigen2x2<T>> {
    assert!(
        a.rows() == 2 && a.cols() == 2,
        "closed-form eigendecomposition requires a 2×2 matrix, got {}×{}",
        a.rows(),
        a.cols()
    );

    let (m00, m01, m10, m11) = (a[(0, 0)], a[(0, 1)], a[(1, 0)], a[(1, 1)]);
    let tr = m00 + m11;
    let det = m00 * m11 - m01 * m10;
    let disc = tr * tr - T::from_f64_lossy(4.0) * det;
    if disc < T::zero() {
        return Err(SolveError::ComplexEigenvalues {
            discriminant: disc.to_f64().unwrap_or(f64::NAN),
        });
    }

    let root = disc.sqrt();
    let l1 = (tr + root) / T::two();
    let l2 = (tr - root) / T::two();

    let (x1, y1) = eigenvector(m00 - l1, m01, m10, m11 - l1);
    let (x2, y2) = eigenvector(m00 - l2, m01, m10, m11 - l2);

    let mut vectors = DenseMatrix::zeros(2, 2);
    vectors[(0, 0)] = x1;
    vectors[(1, 0)] = y1;
    vectors[(0, 1)] = x2;
    vectors[(1, 1)] = y2;

    Ok(Eigen2x2 {
        values: (l1, l2),
        vectors,
    })
}

/// Null vector of the singular matrix `[[a, b], [c, d]]`
fn eigenvector<T: RealField>(a: T, b: T, c: T, d: T) -> (T, T) {
    let (x, y) = if a.abs() + b.abs() >= c.abs() + d.abs() {
        (-b, a)
    } else {
        (-d, c)
    };
    let norm = (x * x + y * y).sqrt();
    if norm.is_zero() {
        (x, y)
    } else {
        (x / norm, y / norm)
    }
}

impl<T: RealField> DenseMatrix<T> {
    /// Closed-form eigendecomposition of a 2×2 matrix, see [`eigen_2x2`]
    pub fn eigen_decomposition_2x2(&self) -> Result<Eigen2x2<T>> {
        eigen_2x2(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn check_pair(a: &DenseMatrix<f64>, lambda: f64, x: f64, y: f64) {
        let v = DenseMatrix::column_vector(&[x, y]);
        assert_relative_eq!(a * &v, &v * lambda, epsilon = 1e-12);
    }

    #[test]
    fn test_diagonal() {
        let a = DenseMatrix::from_rows(vec![vec![2.0_f64, 0.0], vec![0.0, 3.0]]);
        let eig = eigen_2x2(&a).expect("real eigenvalues");

        assert_eq!(eig.values, (3.0, 2.0));
        // Eigenvectors are unit axes up to sign
        assert_relative_eq!(eig.vectors[(0, 0)].abs(), 0.0);
        assert_relative_eq!(eig.vectors[(1, 0)].abs(), 1.0);
        assert_relative_eq!(eig.vectors[(0, 1)].abs(), 1.0);
        assert_relative_eq!(eig.vectors[(1, 1)].abs(), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = DenseMatrix::from_rows(vec![vec![2.0_f64, 1.0], vec![1.0, 2.0]]);
        let eig = a.eigen_decomposition_2x2().expect("real eigenvalues");

        assert_relative_eq!(eig.values.0, 3.0, epsilon = 1e-12);
        assert_relative_eq!(eig.values.1, 1.0, epsilon = 1e-12);
        for (i, lambda) in [eig.values.0, eig.values.1].into_iter().enumerate() {
            let (x, y) = (eig.vectors[(0, i)], eig.vectors[(1, i)]);
            assert_relative_eq!(x * x + y * y, 1.0, epsilon = 1e-12);
            check_pair(&a, lambda, x, y);
        }
    }

    #[test]
    fn test_non_symmetric() {
        // Eigenvalues 5 and 2
        let a = DenseMatrix::from_rows(vec![vec![4.0_f64, 1.0], vec![2.0, 3.0]]);
        let eig = eigen_2x2(&a).expect("real eigenvalues");

        assert_relative_eq!(eig.values.0, 5.0, epsilon = 1e-12);
        assert_relative_eq!(eig.values.1, 2.0, epsilon = 1e-12);
        check_pair(&a, eig.values.0, eig.vectors[(0, 0)], eig.vectors[(1, 0)]);
        check_pair(&a, eig.values.1, eig.vectors[(0, 1)], eig.vectors[(1, 1)]);
    }

    #[test]
    fn test_scalar_multiple_of_identity() {
        let a = DenseMatrix::from_rows(vec![vec![2.0_f64, 0.0], vec![0.0, 2.0]]);
        let eig = eigen_2x2(&a).expect("real eigenvalues");

        assert_eq!(eig.values, (2.0, 2.0));
        // A − λI is zero, so the candidate stays unnormalized
        assert!(eig.vectors.is_zero());
    }

    #[test]
    fn test_complex() {
        let rotation = DenseMatrix::from_rows(vec![vec![0.0_f64, -1.0], vec![1.0, 0.0]]);
        let err = eigen_2x2(&rotation).unwrap_err();
        assert!(err.is_complex());
        assert_eq!(err, SolveError::ComplexEigenvalues { discriminant: -4.0 });
    }

    #[test]
    fn test_f32() {
        let a = DenseMatrix::from_rows(vec![vec![4.0_f32, 1.0], vec![2.0, 3.0]]);
        let eig = eigen_2x2(&a).expect("real eigenvalues");
        assert_relative_eq!(eig.values.0, 5.0, epsilon = 1e-5);
        assert_relative_eq!(eig.values.1, 2.0, epsilon = 1e-5);
    }

    #[test]
    #[should_panic(expected = "2×2")]
    fn test_wrong_size() {
        let _ = eigen_2x2(&DenseMatrix::<f64>::identity(3));
    }
}
