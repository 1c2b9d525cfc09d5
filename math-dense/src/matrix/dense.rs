//! Dense row-major matrix
//!
//! [`DenseMatrix`] wraps an [`ndarray::Array2`] kept in standard (C) layout,
//! so element `(i, j)` lives at offset `i * cols + j` of [`DenseMatrix::elements`].
//! The shape is fixed at construction and both dimensions are at least 1.
//!
//! Shape mismatches are programmer errors: constructors, indexing and the
//! arithmetic operators panic with a descriptive message instead of
//! returning a `Result`.

use crate::matrix::Vector2;
use crate::parallel::parallel_map_indexed;
use crate::traits::{RealField, Scalar};
use approx::{AbsDiffEq, RelativeEq};
use ndarray::{Array1, Array2};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// Dense matrix with a fixed `(rows, cols)` shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DenseMatrix<T> {
    data: Array2<T>,
}

impl<T> DenseMatrix<T> {
    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Shape as `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> Vector2<usize> {
        Vector2::new(self.rows(), self.cols())
    }

    /// Check if the matrix is square
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Elements in row-major order
    pub fn elements(&self) -> &[T] {
        self.data
            .as_slice()
            .expect("dense matrix storage is kept in standard layout")
    }

    /// Borrow the underlying array
    pub fn as_array(&self) -> &Array2<T> {
        &self.data
    }

    /// Consume the matrix and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// Create a matrix whose element `(i, j)` is `f(i, j)`
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        assert_positive_shape(rows, cols);
        Self {
            data: Array2::from_shape_fn((rows, cols), |(i, j)| f(i, j)),
        }
    }

    /// Swap two rows in place
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.swap_row_prefix(a, b, self.cols());
    }

    /// Swap the first `len` entries of two rows in place
    pub fn swap_row_prefix(&mut self, a: usize, b: usize, len: usize) {
        self.check_index(a, 0);
        self.check_index(b, 0);
        if a == b {
            return;
        }
        for j in 0..len {
            self.data.swap([a, j], [b, j]);
        }
    }

    #[inline]
    fn check_index(&self, row: usize, col: usize) {
        assert!(
            row < self.rows() && col < self.cols(),
            "index ({row}, {col}) out of range for {}×{} matrix",
            self.rows(),
            self.cols()
        );
    }

    fn assert_same_shape(&self, other: &Self, operation: &str) {
        assert!(
            self.rows() == other.rows() && self.cols() == other.cols(),
            "matrix sizes must match for {operation}: {}×{} vs {}×{}",
            self.rows(),
            self.cols(),
            other.rows(),
            other.cols()
        );
    }
}

impl<T: Clone> DenseMatrix<T> {
    /// Create a matrix from row-major elements
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or `elements.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, elements: Vec<T>) -> Self {
        assert_positive_shape(rows, cols);
        assert_eq!(
            elements.len(),
            rows * cols,
            "need rows*cols = {} elements, got {}",
            rows * cols,
            elements.len()
        );
        let data = Array2::from_shape_vec((rows, cols), elements)
            .unwrap_or_else(|err| panic!("invalid matrix shape: {err}"));
        Self { data }
    }

    /// Create a matrix from a list of rows
    ///
    /// # Panics
    ///
    /// Panics if there are no rows, no columns, or the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        assert!(!rows.is_empty(), "must provide at least one row");
        let cols = rows[0].len();
        assert!(cols > 0, "must provide at least one column");
        assert!(
            rows.iter().all(|row| row.len() == cols),
            "all rows must have the same number of columns"
        );
        let n_rows = rows.len();
        Self::new(n_rows, cols, rows.into_iter().flatten().collect())
    }

    /// Wrap an existing array, copying it into standard layout if needed
    ///
    /// # Panics
    ///
    /// Panics if the array has a zero dimension.
    pub fn from_array(data: Array2<T>) -> Self {
        assert_positive_shape(data.nrows(), data.ncols());
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };
        Self { data }
    }

    /// Element at `(row, col)`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self[(row, col)].clone()
    }

    /// Overwrite the element at `(row, col)`
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self[(row, col)] = value;
    }

    /// Copy of row `i`
    pub fn row(&self, i: usize) -> Array1<T> {
        assert!(i < self.rows(), "row index {i} out of range");
        self.data.row(i).to_owned()
    }

    /// Copy of column `j`
    pub fn col(&self, j: usize) -> Array1<T> {
        assert!(j < self.cols(), "column index {j} out of range");
        self.data.column(j).to_owned()
    }

    /// Matrix with row `r` and column `c` removed
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range or the result would be empty.
    pub fn submatrix(&self, r: usize, c: usize) -> Self {
        assert!(r < self.rows(), "row index {r} out of range");
        assert!(c < self.cols(), "column index {c} out of range");
        let elements = self
            .data
            .indexed_iter()
            .filter(|((i, j), _)| *i != r && *j != c)
            .map(|(_, value)| value.clone())
            .collect();
        Self::new(self.rows() - 1, self.cols() - 1, elements)
    }

    /// Minor matrix of a square matrix of size ≥ 2
    pub fn minor(&self, i: usize, j: usize) -> Self {
        assert!(
            self.is_square() && self.rows() >= 2,
            "minor is defined for square matrices of size ≥ 2"
        );
        self.submatrix(i, j)
    }

    /// Transposed copy
    pub fn transposed(&self) -> Self {
        Self {
            data: self.data.t().as_standard_layout().into_owned(),
        }
    }

    /// Transpose in place
    pub fn transpose(&mut self) {
        *self = self.transposed();
    }
}

impl<T: Scalar> DenseMatrix<T> {
    /// Matrix of zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        assert_positive_shape(rows, cols);
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Identity matrix of size `n`
    pub fn identity(n: usize) -> Self {
        assert!(n > 0, "size must be positive");
        Self {
            data: Array2::eye(n),
        }
    }

    /// Column vector (`n×1` matrix)
    pub fn column_vector(values: &[T]) -> Self {
        Self::new(values.len(), 1, values.to_vec())
    }

    /// Check if every element is zero
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|v| v.is_zero())
    }

    /// Check if this is a square identity matrix
    pub fn is_identity(&self) -> bool {
        self.is_square()
            && self
                .data
                .indexed_iter()
                .all(|((i, j), v)| if i == j { v.is_one() } else { v.is_zero() })
    }

    /// Matrix product `self · rhs`
    ///
    /// Output rows are computed independently (in parallel with the `rayon`
    /// feature). Zero entries of `self` are skipped.
    pub fn matmul(&self, rhs: &Self) -> Self {
        assert_eq!(
            self.cols(),
            rhs.rows(),
            "matrix multiplication requires lhs.cols == rhs.rows"
        );
        let (m, n, p) = (self.rows(), self.cols(), rhs.cols());
        let rows = parallel_map_indexed(m, |i| {
            let mut out = vec![T::zero(); p];
            for k in 0..n {
                let aik = self.data[[i, k]];
                if aik.is_zero() {
                    continue;
                }
                for (j, out_j) in out.iter_mut().enumerate() {
                    *out_j = *out_j + aik * rhs.data[[k, j]];
                }
            }
            out
        });
        Self::new(m, p, rows.into_iter().flatten().collect())
    }

    /// Matrix-vector product `self · x`
    pub fn mul_vector(&self, x: &Array1<T>) -> Array1<T> {
        assert_eq!(
            x.len(),
            self.cols(),
            "vector length must equal the number of columns"
        );
        self.data
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .zip(x.iter())
                    .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
            })
            .collect()
    }

    /// Determinant by cofactor expansion along the first row
    ///
    /// Exact for integer element types. Zero entries of the expansion row are
    /// skipped.
    pub fn determinant(&self) -> T {
        assert!(
            self.is_square(),
            "determinant is defined only for square matrices"
        );
        let d = &self.data;
        match self.rows() {
            1 => d[[0, 0]],
            2 => d[[0, 0]] * d[[1, 1]] - d[[0, 1]] * d[[1, 0]],
            n => (0..n).fold(T::zero(), |det, j| {
                let a0j = d[[0, j]];
                if a0j.is_zero() {
                    return det;
                }
                let cofactor = a0j * self.submatrix(0, j).determinant();
                if j % 2 == 0 { det + cofactor } else { det - cofactor }
            }),
        }
    }
}

impl<T: RealField> DenseMatrix<T> {
    /// Elementwise comparison with relative and absolute tolerances
    ///
    /// Two elements match when they are equal, or when neither is NaN and
    /// `|a - b| <= max(atol, rtol * max(|a|, |b|))`.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn is_around(&self, other: &Self, rtol: T, atol: T) -> bool {
        self.assert_same_shape(other, "comparison");
        self.data.iter().zip(other.data.iter()).all(|(&a, &b)| {
            if a == b {
                return true;
            }
            if a.is_nan() || b.is_nan() {
                return false;
            }
            (a - b).abs() <= atol.max(rtol * a.abs().max(b.abs()))
        })
    }

    /// Check `|A[i,j] - A[j,i]| <= tol` for every pair
    pub fn is_symmetric(&self, tol: T) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.rows();
        (0..n).all(|i| {
            (i + 1..n).all(|j| (self.data[[i, j]] - self.data[[j, i]]).abs() <= tol)
        })
    }

    /// Check if every element is finite
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

fn assert_positive_shape(rows: usize, cols: usize) {
    assert!(
        rows > 0 && cols > 0,
        "matrix size must be positive, got {rows}×{cols}"
    );
}

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        self.check_index(row, col);
        &self.data[[row, col]]
    }
}

impl<T> IndexMut<(usize, usize)> for DenseMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        self.check_index(row, col);
        &mut self.data[[row, col]]
    }
}

impl<T: Scalar> Add<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn add(self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
        self.assert_same_shape(rhs, "addition");
        DenseMatrix {
            data: &self.data + &rhs.data,
        }
    }
}

impl<T: Scalar> Add for DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn add(self, rhs: DenseMatrix<T>) -> DenseMatrix<T> {
        &self + &rhs
    }
}

impl<T: Scalar> Sub<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn sub(self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
        self.assert_same_shape(rhs, "subtraction");
        DenseMatrix {
            data: &self.data - &rhs.data,
        }
    }
}

impl<T: Scalar> Sub for DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn sub(self, rhs: DenseMatrix<T>) -> DenseMatrix<T> {
        &self - &rhs
    }
}

impl<T: Scalar> AddAssign<&DenseMatrix<T>> for DenseMatrix<T> {
    fn add_assign(&mut self, rhs: &DenseMatrix<T>) {
        self.assert_same_shape(rhs, "addition");
        self.data.zip_mut_with(&rhs.data, |a, &b| *a = *a + b);
    }
}

impl<T: Scalar> SubAssign<&DenseMatrix<T>> for DenseMatrix<T> {
    fn sub_assign(&mut self, rhs: &DenseMatrix<T>) {
        self.assert_same_shape(rhs, "subtraction");
        self.data.zip_mut_with(&rhs.data, |a, &b| *a = *a - b);
    }
}

impl<T: Scalar> Mul<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn mul(self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
        self.matmul(rhs)
    }
}

impl<T: Scalar> Mul for DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn mul(self, rhs: DenseMatrix<T>) -> DenseMatrix<T> {
        self.matmul(&rhs)
    }
}

impl<T: Scalar> Mul<T> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn mul(self, rhs: T) -> DenseMatrix<T> {
        DenseMatrix {
            data: self.data.mapv(|v| v * rhs),
        }
    }
}

impl<T: Scalar> Mul<T> for DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn mul(mut self, rhs: T) -> DenseMatrix<T> {
        self *= rhs;
        self
    }
}

impl<T: Scalar> MulAssign<T> for DenseMatrix<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.data.mapv_inplace(|v| v * rhs);
    }
}

macro_rules! impl_scalar_lhs_mul {
    ($($t:ty),*) => {
        $(
            impl Mul<DenseMatrix<$t>> for $t {
                type Output = DenseMatrix<$t>;

                fn mul(self, rhs: DenseMatrix<$t>) -> DenseMatrix<$t> {
                    rhs * self
                }
            }

            impl Mul<&DenseMatrix<$t>> for $t {
                type Output = DenseMatrix<$t>;

                fn mul(self, rhs: &DenseMatrix<$t>) -> DenseMatrix<$t> {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_lhs_mul!(f32, f64, i32, i64);

impl<T: Scalar + Neg<Output = T>> Neg for DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn neg(mut self) -> DenseMatrix<T> {
        self.data.mapv_inplace(|v| -v);
        self
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn neg(self) -> DenseMatrix<T> {
        -self.clone()
    }
}

impl<T: RealField> Div<T> for DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn div(mut self, rhs: T) -> DenseMatrix<T> {
        self /= rhs;
        self
    }
}

impl<T: RealField> Div<T> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn div(self, rhs: T) -> DenseMatrix<T> {
        self.clone() / rhs
    }
}

impl<T: RealField> DivAssign<T> for DenseMatrix<T> {
    fn div_assign(&mut self, rhs: T) {
        self.data.mapv_inplace(|v| v / rhs);
    }
}

impl<T: RealField + AbsDiffEq<Epsilon = T>> AbsDiffEq for DenseMatrix<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.data.abs_diff_eq(&other.data, epsilon)
    }
}

impl<T: RealField + RelativeEq<Epsilon = T>> RelativeEq for DenseMatrix<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.data.relative_eq(&other.data, epsilon, max_relative)
    }
}

/// One line per row, framed with box-drawing brackets:
///
/// ```text
/// ┏ 1 2 ┓
/// ┃ 3 4 ┃
/// ┗ 5 6 ┛
/// ```
impl<T: fmt::Display> fmt::Display for DenseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.rows() - 1;
        for (i, row) in self.data.rows().into_iter().enumerate() {
            let (prefix, suffix) = match i {
                _ if last == 0 => ("[", "]"),
                0 => ("┏", "┓"),
                i if i == last => ("┗", "┛"),
                _ => ("┃", "┃"),
            };
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{prefix}")?;
            for value in row.iter() {
                write!(f, " {value}")?;
            }
            write!(f, " {suffix}")?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct MatrixRef<'a, T> {
    rows: usize,
    cols: usize,
    elements: &'a [T],
}

#[derive(Deserialize)]
struct MatrixOwned<T> {
    rows: usize,
    cols: usize,
    elements: Vec<T>,
}

impl<T: Serialize> Serialize for DenseMatrix<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MatrixRef {
            rows: self.rows(),
            cols: self.cols(),
            elements: self.elements(),
        }
        .serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for DenseMatrix<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = MatrixOwned::<T>::deserialize(deserializer)?;
        if raw.rows == 0 || raw.cols == 0 {
            return Err(de::Error::custom(format!(
                "matrix size must be positive, got {}×{}",
                raw.rows, raw.cols
            )));
        }
        if raw.elements.len() != raw.rows * raw.cols {
            return Err(de::Error::invalid_length(
                raw.elements.len(),
                &"rows * cols elements",
            ));
        }
        Array2::from_shape_vec((raw.rows, raw.cols), raw.elements)
            .map(|data| Self { data })
            .map_err(de::Error::custom)
    }
}
