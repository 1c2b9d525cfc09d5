//! Eigenvalue solvers
//!
//! - [`symmetric_eigen`]: Jacobi rotations for symmetric matrices of any size
//! - [`eigen_2x2`]: closed form for general real 2×2 matrices

mod closed_form;
mod jacobi;

pub use closed_form::{Eigen2x2, eigen_2x2};
pub use jacobi::{JacobiConfig, SymmetricEigen, symmetric_eigen};

pub(crate) use jacobi::default_max_sweeps;
