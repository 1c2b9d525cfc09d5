//! Jacobi eigenvalue solver
//!
//! Diagonalizes a symmetric matrix with plane rotations. Each sweep picks the
//! largest off-diagonal entry `(p, q)` and applies the rotation that zeroes
//! it; the rotations are accumulated into the eigenvector matrix.

use crate::matrix::DenseMatrix;
use crate::traits::RealField;
use serde::{Deserialize, Serialize};

/// Jacobi solver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JacobiConfig<R> {
    /// Maximum number of rotations
    #[serde(default = "default_max_sweeps")]
    pub max_sweeps: usize,
    /// Largest off-diagonal magnitude accepted as converged; also the
    /// symmetry tolerance of the input check. The default 0 keeps rotating
    /// until the budget is spent.
    pub tolerance: R,
    /// Log progress every N sweeps (0 = no output)
    #[serde(default)]
    pub print_interval: usize,
}

impl<R: RealField> Default for JacobiConfig<R> {
    fn default() -> Self {
        Self {
            max_sweeps: default_max_sweeps(),
            tolerance: R::zero(),
            print_interval: 0,
        }
    }
}

pub(crate) fn default_max_sweeps() -> usize {
    50
}

/// Eigendecomposition of a symmetric matrix
///
/// `values[i]` belongs to column `i` of `vectors`. No ordering is imposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymmetricEigen<T> {
    /// Eigenvalues
    pub values: Vec<T>,
    /// Orthonormal eigenvectors, one per column
    pub vectors: DenseMatrix<T>,
    /// Number of rotations applied
    pub sweeps: usize,
    /// Whether every off-diagonal entry ended at or below the tolerance.
    /// With the default tolerance of 0 this means an exact zero, which
    /// rarely happens for `n ≥ 3` even when the result is accurate to
    /// machine precision.
    pub converged: bool,
}

/// Compute eigenvalues and eigenvectors of a symmetric matrix
///
/// Running out of sweeps is not an error: the current diagonal and rotation
/// accumulator are returned as they stand, with `converged == false`.
///
/// # Panics
///
/// Panics if `a` is not square or not symmetric within `config.tolerance`.
pub fn symmetric_eigen<T: RealField>(
    a: &DenseMatrix<T>,
    config: &JacobiConfig<T>,
) -> SymmetricEigen<T> {
    assert!(
        a.is_square(),
        "eigendecomposition requires a square matrix, got {}×{}",
        a.rows(),
        a.cols()
    );
    assert!(
        a.is_symmetric(config.tolerance),
        "matrix must be symmetric"
    );

    let n = a.rows();
    if n == 1 {
        return SymmetricEigen {
            values: vec![a[(0, 0)]],
            vectors: DenseMatrix::identity(1),
            sweeps: 0,
            converged: true,
        };
    }

    let mut a = a.clone();
    let mut v = DenseMatrix::identity(n);
    let mut sweeps = 0;
    let mut converged = false;

    for sweep in 0..config.max_sweeps {
        let (p, q, max_off) = largest_off_diagonal(&a);

        if config.print_interval > 0 && sweep % config.print_interval == 0 {
            log::info!(
                "Jacobi sweep {}: max off-diagonal = {:.6e}",
                sweep,
                max_off.to_f64().unwrap_or(0.0)
            );
        }

        if max_off <= config.tolerance {
            converged = true;
            break;
        }

        rotate(&mut a, &mut v, p, q);
        sweeps += 1;
    }

    if !converged {
        let (_, _, max_off) = largest_off_diagonal(&a);
        converged = max_off <= config.tolerance;
        if !converged {
            log::debug!(
                "Jacobi stopped after {} sweeps with max off-diagonal {:.6e}",
                sweeps,
                max_off.to_f64().unwrap_or(0.0)
            );
        }
    }

    let values = (0..n).map(|i| a[(i, i)]).collect();
    SymmetricEigen {
        values,
        vectors: v,
        sweeps,
        converged,
    }
}

/// Position and magnitude of the largest `|a[i, j]|` with `i < j`
///
/// Ties keep the first entry in row-major order.
fn largest_off_diagonal<T: RealField>(a: &DenseMatrix<T>) -> (usize, usize, T) {
    let n = a.rows();
    let mut best = (0, 1, a[(0, 1)].abs());
    for i in 0..n {
        for j in (i + 1)..n {
            let v = a[(i, j)].abs();
            if v > best.2 {
                best = (i, j, v);
            }
        }
    }
    best
}

/// Apply the rotation that zeroes `a[p, q]`, accumulating it into `v`
fn rotate<T: RealField>(a: &mut DenseMatrix<T>, v: &mut DenseMatrix<T>, p: usize, q: usize) {
    let n = a.rows();
    let one = T::one();
    let two = T::two();

    let app = a[(p, p)];
    let aqq = a[(q, q)];
    let apq = a[(p, q)];

    // t = sign(tau) / (|tau| + sqrt(1 + tau²)), the smaller root
    let tau = (aqq - app) / (two * apq);
    let t = if tau >= T::zero() {
        one / (tau + (one + tau * tau).sqrt())
    } else {
        -one / (-tau + (one + tau * tau).sqrt())
    };
    let c = one / (one + t * t).sqrt();
    let s = t * c;

    for k in 0..n {
        if k == p || k == q {
            continue;
        }
        let akp = a[(k, p)];
        let akq = a[(k, q)];
        a[(k, p)] = akp * c - akq * s;
        a[(p, k)] = a[(k, p)];
        a[(k, q)] = akq * c + akp * s;
        a[(q, k)] = a[(k, q)];
    }

    a[(p, p)] = app * c * c - two * apq * c * s + aqq * s * s;
    a[(q, q)] = aqq * c * c + two * apq * c * s + app * s * s;
    a[(p, q)] = T::zero();
    a[(q, p)] = T::zero();

    for k in 0..n {
        let vkp = v[(k, p)];
        let vkq = v[(k, q)];
        v[(k, p)] = vkp * c - vkq * s;
        v[(k, q)] = vkq * c + vkp * s;
    }
}

impl<T: RealField> DenseMatrix<T> {
    /// Symmetric eigendecomposition with the default [`JacobiConfig`]
    pub fn symmetric_eigen_decomposition(&self) -> SymmetricEigen<T> {
        symmetric_eigen(self, &JacobiConfig::default())
    }
}
