//! Moore–Penrose pseudoinverse
//!
//! Built on the symmetric eigendecomposition of `AᵀA`:
//! `AᵀA = V·Λ·Vᵀ`, `σᵢ = √λᵢ`, `uᵢ = A·vᵢ / σᵢ`, and `A⁺ = V·Σ⁺·Uᵀ`
//! where singular values below the threshold contribute zero.

use crate::eigen::{JacobiConfig, default_max_sweeps, symmetric_eigen};
use crate::matrix::DenseMatrix;
use crate::traits::RealField;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Relative cutoff factor for the default singular value threshold
const DEFAULT_RCOND: f64 = 1e-12;

/// Pseudoinverse configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PseudoinverseConfig<R> {
    /// Singular values at or below this are treated as zero.
    /// `None` uses `1e-12 · max(rows, cols) · σ_max`.
    pub tolerance: Option<R>,
    /// Rotation budget of the inner Jacobi solve
    #[serde(default = "default_max_sweeps")]
    pub max_sweeps: usize,
}

impl<R> Default for PseudoinverseConfig<R> {
    fn default() -> Self {
        Self {
            tolerance: None,
            max_sweeps: default_max_sweeps(),
        }
    }
}

/// Moore–Penrose pseudoinverse of an `m×n` matrix, shape `n×m`
///
/// Never fails. Rank deficiency is absorbed by zeroing the small singular
/// values; if `AᵀA` is not finite the zero matrix is returned.
pub fn pseudoinverse<T: RealField>(
    a: &DenseMatrix<T>,
    config: &PseudoinverseConfig<T>,
) -> DenseMatrix<T> {
    let (m, n) = (a.rows(), a.cols());
    let at = a.transposed();
    let ata = &at * a;

    if !ata.is_finite() {
        log::debug!("pseudoinverse: AᵀA is not finite, returning zero matrix");
        return DenseMatrix::zeros(n, m);
    }

    let jacobi = JacobiConfig {
        max_sweeps: config.max_sweeps,
        tolerance: T::zero(),
        print_interval: 0,
    };
    let eig = symmetric_eigen(&ata, &jacobi);

    // Descending eigenvalue order
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        eig.values[j]
            .partial_cmp(&eig.values[i])
            .unwrap_or(Ordering::Equal)
    });

    let sigma: Vec<T> = order
        .iter()
        .map(|&i| eig.values[i].max(T::zero()).sqrt())
        .collect();
    let v = DenseMatrix::from_fn(n, n, |r, c| eig.vectors[(r, order[c])]);

    let threshold = config.tolerance.unwrap_or_else(|| {
        let sigma_max = sigma.first().copied().unwrap_or_else(T::zero);
        let scale = if sigma_max.is_zero() { T::one() } else { sigma_max };
        T::from_f64_lossy(DEFAULT_RCOND) * T::from_f64_lossy(m.max(n) as f64) * scale
    });

    // U columns for the retained singular values, zero elsewhere
    let av = a * &v;
    let mut u = DenseMatrix::zeros(m, n);
    let mut v_scaled = v;
    let mut rank = 0;
    for (j, &s) in sigma.iter().enumerate() {
        if s > threshold {
            rank += 1;
            for r in 0..m {
                u[(r, j)] = av[(r, j)] / s;
            }
            for r in 0..n {
                v_scaled[(r, j)] /= s;
            }
        } else {
            for r in 0..n {
                v_scaled[(r, j)] = T::zero();
            }
        }
    }
    log::debug!("pseudoinverse: {}×{} matrix, numerical rank {}", m, n, rank);

    &v_scaled * &u.transposed()
}

impl<T: RealField> DenseMatrix<T> {
    /// Pseudoinverse with the default [`PseudoinverseConfig`]
    pub fn pseudoinverse(&self) -> DenseMatrix<T> {
        pseudoinverse(self, &PseudoinverseConfig::default())
    }
}
