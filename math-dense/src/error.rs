//! Error types for the direct solvers.
//!
//! Only numerical failures are reported here. Shape and symmetry
//! preconditions are programmer errors and panic at the call site.

use thiserror::Error;

/// Numerical failures reported by the solvers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// A zero pivot was met: the matrix is singular to working precision.
    #[error("matrix is singular to working precision (zero pivot at index {pivot})")]
    Singular {
        /// Row/column index where the zero pivot appeared
        pivot: usize,
    },

    /// The 2×2 closed form has a negative discriminant.
    #[error("matrix has no real eigenvalues (discriminant {discriminant} < 0)")]
    ComplexEigenvalues {
        /// The negative discriminant `tr² − 4·det`
        discriminant: f64,
    },
}

/// A specialized `Result` type for solver operations.
pub type Result<T> = std::result::Result<T, SolveError>;

impl SolveError {
    /// Returns `true` if this is a singular-matrix error.
    pub fn is_singular(&self) -> bool {
        matches!(self, SolveError::Singular { .. })
    }

    /// Returns `true` if the eigenvalues are not real.
    pub fn is_complex(&self) -> bool {
        matches!(self, SolveError::ComplexEigenvalues { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SolveError::Singular { pivot: 2 };
        assert_eq!(
            err.to_string(),
            "matrix is singular to working precision (zero pivot at index 2)"
        );

        let err = SolveError::ComplexEigenvalues { discriminant: -4.0 };
        assert!(err.to_string().contains("-4"));
    }

    #[test]
    fn test_error_kind() {
        let singular = SolveError::Singular { pivot: 0 };
        let complex = SolveError::ComplexEigenvalues { discriminant: -1.0 };

        assert!(singular.is_singular());
        assert!(!singular.is_complex());
        assert!(complex.is_complex());
        assert!(!complex.is_singular());
    }
}
