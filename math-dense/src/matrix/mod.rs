//! Dense matrix container and 2D vector
//!
//! - [`DenseMatrix`]: row-major matrix with checked indexing and arithmetic
//! - [`Vector2`]: 2D vector, also used as the matrix shape type

mod dense;
mod vector2;

pub use dense::DenseMatrix;
pub use vector2::Vector2;
