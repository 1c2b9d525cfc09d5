//! LU decomposition solver
//!
//! Factors a square matrix as `P·A = L·U` with a row permutation `P`, a unit
//! lower-triangular `L` and an upper-triangular `U`, then solves systems by
//! forward and back substitution.

use super::find_pivot;
use crate::error::{Result, SolveError};
use crate::matrix::DenseMatrix;
use crate::traits::RealField;
use ndarray::Array1;
use serde::{Deserialize, Deserializer, Serialize, de};

/// LU factorization result
///
/// Row `i` of `P·A` is row `permutation[i]` of `A`.
///
/// Deserialization checks that `permutation` is a bijection on `0..n` and
/// that `l` and `u` are `n×n`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LuFactorization<T> {
    /// Row permutation applied to the input
    pub permutation: Vec<usize>,
    /// Unit lower-triangular factor
    pub l: DenseMatrix<T>,
    /// Upper-triangular factor
    pub u: DenseMatrix<T>,
}

impl<T: RealField> LuFactorization<T> {
    /// Matrix dimension
    pub fn n(&self) -> usize {
        self.permutation.len()
    }

    /// Solve `A·x = b` using the pre-computed factorization
    ///
    /// Returns [`SolveError::Singular`] if `U` has a zero on its diagonal,
    /// which can only happen for factorizations built without pivoting.
    ///
    /// # Panics
    ///
    /// Panics if `b.len()` differs from the matrix dimension.
    pub fn solve(&self, b: &Array1<T>) -> Result<Array1<T>> {
        let n = self.n();
        assert_eq!(b.len(), n, "b.len() must equal the matrix dimension");

        // Apply row permutation
        let bp: Array1<T> = self.permutation.iter().map(|&p| b[p]).collect();

        // Forward substitution: Ly = Pb
        let mut y = Array1::<T>::zeros(n);
        for i in 0..n {
            let mut s = bp[i];
            for j in 0..i {
                s -= self.l[(i, j)] * y[j];
            }
            y[i] = s / self.l[(i, i)];
        }

        // Backward substitution: Ux = y
        let mut x = Array1::<T>::zeros(n);
        for i in (0..n).rev() {
            let mut s = y[i];
            for j in (i + 1)..n {
                s -= self.u[(i, j)] * x[j];
            }
            let u_ii = self.u[(i, i)];
            if u_ii.is_zero() {
                return Err(SolveError::Singular { pivot: i });
            }
            x[i] = s / u_ii;
        }

        Ok(x)
    }

    /// Solve `A·X = B` column by column
    ///
    /// # Panics
    ///
    /// Panics if `b.rows()` differs from the matrix dimension.
    pub fn solve_matrix(&self, b: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        assert_eq!(b.rows(), self.n(), "B.rows must equal the matrix dimension");
        let mut x = DenseMatrix::zeros(b.rows(), b.cols());
        for c in 0..b.cols() {
            let column = self.solve(&b.col(c))?;
            for (i, &value) in column.iter().enumerate() {
                x[(i, c)] = value;
            }
        }
        Ok(x)
    }

    /// Permutation matrix `P` such that `P·A = L·U`
    pub fn permutation_matrix(&self) -> DenseMatrix<T> {
        let n = self.n();
        DenseMatrix::from_fn(n, n, |i, j| {
            if self.permutation[i] == j {
                T::one()
            } else {
                T::zero()
            }
        })
    }

    /// Determinant of the factored matrix: `sign(P)·∏ U[i,i]`
    pub fn determinant(&self) -> T {
        let diag = (0..self.n()).fold(T::one(), |acc, i| acc * self.u[(i, i)]);
        if permutation_is_odd(&self.permutation) {
            -diag
        } else {
            diag
        }
    }
}

#[derive(Deserialize)]
struct LuParts<T> {
    permutation: Vec<usize>,
    l: DenseMatrix<T>,
    u: DenseMatrix<T>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for LuFactorization<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = LuParts::<T>::deserialize(deserializer)?;
        let n = raw.permutation.len();
        for (name, m) in [("l", &raw.l), ("u", &raw.u)] {
            if m.rows() != n || m.cols() != n {
                return Err(de::Error::custom(format!(
                    "factor {name} is {}×{}, expected {n}×{n}",
                    m.rows(),
                    m.cols()
                )));
            }
        }
        let mut seen = vec![false; n];
        for &p in &raw.permutation {
            if p >= n || seen[p] {
                return Err(de::Error::custom(format!(
                    "permutation is not a bijection on 0..{n} (entry {p})"
                )));
            }
            seen[p] = true;
        }
        Ok(Self {
            permutation: raw.permutation,
            l: raw.l,
            u: raw.u,
        })
    }
}

/// Parity of a permutation from its cycle decomposition
fn permutation_is_odd(permutation: &[usize]) -> bool {
    let mut visited = vec![false; permutation.len()];
    let mut transpositions = 0;
    for start in 0..permutation.len() {
        let mut len = 0;
        let mut i = start;
        while !visited[i] {
            visited[i] = true;
            i = permutation[i];
            len += 1;
        }
        if len > 0 {
            transpositions += len - 1;
        }
    }
    transpositions % 2 == 1
}

/// Compute an LU factorization
///
/// With `partial_pivoting`, each column's largest remaining entry is swapped
/// onto the diagonal; without it, the rows are used as given. A zero pivot
/// returns [`SolveError::Singular`].
///
/// # Panics
///
/// Panics if `a` is not square.
pub fn lu_factorize<T: RealField>(
    a: &DenseMatrix<T>,
    partial_pivoting: bool,
) -> Result<LuFactorization<T>> {
    assert!(
        a.is_square(),
        "LU factorization requires a square matrix, got {}×{}",
        a.rows(),
        a.cols()
    );

    let n = a.rows();
    let mut u = a.clone();
    let mut l = DenseMatrix::zeros(n, n);
    let mut permutation: Vec<usize> = (0..n).collect();

    for k in 0..n {
        let pivot = if partial_pivoting {
            let (row, max_val) = find_pivot(&u, k);
            if max_val.is_zero() {
                return Err(SolveError::Singular { pivot: k });
            }
            row
        } else {
            if u[(k, k)].is_zero() {
                return Err(SolveError::Singular { pivot: k });
            }
            k
        };

        // Swap rows if needed
        if pivot != k {
            u.swap_rows(k, pivot);
            l.swap_row_prefix(k, pivot, k);
            permutation.swap(k, pivot);
        }

        // Compute multipliers and eliminate
        l[(k, k)] = T::one();
        let u_kk = u[(k, k)];
        for i in (k + 1)..n {
            let f = u[(i, k)] / u_kk;
            l[(i, k)] = f;
            u[(i, k)] = T::zero();
            for j in (k + 1)..n {
                let u_kj = u[(k, j)];
                u[(i, j)] -= f * u_kj;
            }
        }
    }

    Ok(LuFactorization { permutation, l, u })
}

/// LU factorization with partial pivoting
pub fn lu_decompose<T: RealField>(a: &DenseMatrix<T>) -> Result<LuFactorization<T>> {
    lu_factorize(a, true)
}

/// Solve `A·x = b` using LU decomposition
///
/// This is a convenience function that combines factorization and solve.
pub fn lu_solve<T: RealField>(a: &DenseMatrix<T>, b: &Array1<T>) -> Result<Array1<T>> {
    assert_eq!(b.len(), a.rows(), "b.len() must equal A.rows");
    lu_decompose(a)?.solve(b)
}

/// Solve `A·X = B` using LU decomposition, one column at a time
pub fn lu_solve_matrix<T: RealField>(
    a: &DenseMatrix<T>,
    b: &DenseMatrix<T>,
) -> Result<DenseMatrix<T>> {
    assert_eq!(b.rows(), a.rows(), "B.rows must equal A.rows");
    lu_decompose(a)?.solve_matrix(b)
}

impl<T: RealField> DenseMatrix<T> {
    /// LU factorization, see [`lu_factorize`]
    pub fn lu_decomposition(&self, partial_pivoting: bool) -> Result<LuFactorization<T>> {
        lu_factorize(self, partial_pivoting)
    }

    /// Solve `self · x = b` with a pivoted LU factorization
    pub fn solve_lu(&self, b: &Array1<T>) -> Result<Array1<T>> {
        lu_solve(self, b)
    }

    /// Solve `self · X = b` with a pivoted LU factorization
    pub fn solve_lu_matrix(&self, b: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        lu_solve_matrix(self, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_lu_solve_real() {
        let a = DenseMatrix::from_rows(vec![vec![4.0_f64, 1.0], vec![1.0, 3.0]]);
        let b = array![1.0_f64, 2.0];

        let x = lu_solve(&a, &b).expect("LU solve should succeed");

        // Verify: Ax = b
        let ax = a.mul_vector(&x);
        for i in 0..2 {
            assert_relative_eq!(ax[i], b[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_lu_identity() {
        let n = 5;
        let a = DenseMatrix::<f64>::identity(n);
        let b = Array1::from_iter((1..=n).map(|i| i as f64));

        let x = lu_solve(&a, &b).expect("LU solve should succeed");

        for i in 0..n {
            assert_relative_eq!(x[i], b[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_lu_singular() {
        let a = DenseMatrix::from_rows(vec![vec![1.0_f64, 2.0], vec![2.0, 4.0]]);
        let b = array![1.0_f64, 2.0];

        let result = lu_solve(&a, &b);
        assert!(result.is_err_and(|err| err.is_singular()));
    }

    #[test]
    fn test_lu_factors() {
        let a = DenseMatrix::from_rows(vec![
            vec![1.0_f64, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 10.0],
        ]);

        let lu = a.lu_decomposition(true).expect("Factorization should succeed");

        assert_eq!(lu.permutation, vec![2, 0, 1]);
        for i in 0..3 {
            assert_eq!(lu.l[(i, i)], 1.0);
            for j in (i + 1)..3 {
                assert_eq!(lu.l[(i, j)], 0.0);
                assert_eq!(lu.u[(j, i)], 0.0);
            }
        }
        let pa = &lu.permutation_matrix() * &a;
        assert_relative_eq!(pa, &lu.l * &lu.u, epsilon = 1e-12);
        assert_relative_eq!(lu.determinant(), -3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lu_without_pivoting() {
        let a = DenseMatrix::from_rows(vec![vec![2.0_f64, 1.0], vec![4.0, 3.0]]);

        let lu = lu_factorize(&a, false).expect("leading minors are nonzero");
        assert_eq!(lu.permutation, vec![0, 1]);
        assert_eq!(
            lu.l,
            DenseMatrix::from_rows(vec![vec![1.0, 0.0], vec![2.0, 1.0]])
        );
        assert_eq!(
            lu.u,
            DenseMatrix::from_rows(vec![vec![2.0, 1.0], vec![0.0, 1.0]])
        );

        // A zero leading entry is fatal without pivoting, harmless with it
        let swap = DenseMatrix::from_rows(vec![vec![0.0_f64, 1.0], vec![1.0, 0.0]]);
        assert_eq!(
            lu_factorize(&swap, false),
            Err(SolveError::Singular { pivot: 0 })
        );
        let lu = lu_factorize(&swap, true).expect("permutation matrix is regular");
        assert_eq!(lu.permutation, vec![1, 0]);
        assert_relative_eq!(lu.determinant(), -1.0);
    }

    #[test]
    fn test_lu_factorize_and_solve() {
        let a = DenseMatrix::from_rows(vec![
            vec![4.0_f64, 1.0, 0.0],
            vec![1.0, 3.0, 1.0],
            vec![0.0, 1.0, 2.0],
        ]);

        let factorization = lu_decompose(&a).expect("Factorization should succeed");

        // Solve multiple RHS
        let b1 = array![1.0_f64, 2.0, 3.0];
        let x1 = factorization.solve(&b1).expect("Solve should succeed");

        let ax1 = a.mul_vector(&x1);
        for i in 0..3 {
            assert_relative_eq!(ax1[i], b1[i], epsilon = 1e-10);
        }

        let b = DenseMatrix::from_rows(vec![
            vec![1.0, 4.0],
            vec![2.0, 5.0],
            vec![3.0, 6.0],
        ]);
        let x = factorization.solve_matrix(&b).expect("Solve should succeed");
        assert_relative_eq!(&a * &x, b, epsilon = 1e-10);
        for i in 0..3 {
            assert_relative_eq!(x[(i, 0)], x1[i], epsilon = 1e-14);
        }
    }

    #[test]
    fn test_lu_matches_elimination() {
        let a = DenseMatrix::from_rows(vec![vec![4.0_f64, 3.0], vec![6.0, 3.0]]);
        let b = DenseMatrix::column_vector(&[1.0, 1.0]);

        let x_lu = a.solve_lu_matrix(&b).expect("regular");
        let x_ge = a.solve_gaussian(&b).expect("regular");
        assert_relative_eq!(x_lu, x_ge, epsilon = 1e-12);
        let x = a.solve_lu(&array![1.0, 1.0]).expect("regular");
        assert_relative_eq!(x[1], 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_permutation_parity() {
        assert!(!permutation_is_odd(&[0, 1, 2]));
        assert!(permutation_is_odd(&[1, 0, 2]));
        assert!(!permutation_is_odd(&[2, 0, 1]));
        assert!(!permutation_is_odd(&[4, 3, 2, 1, 0]));
        assert!(permutation_is_odd(&[1, 2, 3, 0]));
    }

    #[test]
    fn test_serde_roundtrip() {
        let a = DenseMatrix::from_rows(vec![vec![0.0_f64, 2.0], vec![1.0, 1.0]]);
        let lu = lu_decompose(&a).unwrap();
        let json = serde_json::to_string(&lu).unwrap();
        let back: LuFactorization<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lu);
    }

    #[test]
    fn test_serde_rejects_inconsistent_factors() {
        let identity = r#"{"rows":2,"cols":2,"elements":[1.0,0.0,0.0,1.0]}"#;

        let out_of_range = format!(r#"{{"permutation":[0,2],"l":{identity},"u":{identity}}}"#);
        assert!(serde_json::from_str::<LuFactorization<f64>>(&out_of_range).is_err());

        let repeated = format!(r#"{{"permutation":[1,1],"l":{identity},"u":{identity}}}"#);
        assert!(serde_json::from_str::<LuFactorization<f64>>(&repeated).is_err());

        let short = format!(r#"{{"permutation":[0],"l":{identity},"u":{identity}}}"#);
        assert!(serde_json::from_str::<LuFactorization<f64>>(&short).is_err());

        let valid = format!(r#"{{"permutation":[1,0],"l":{identity},"u":{identity}}}"#);
        let lu: LuFactorization<f64> = serde_json::from_str(&valid).unwrap();
        assert_eq!(lu.determinant(), -1.0);
    }
}
