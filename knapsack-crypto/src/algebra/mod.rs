//! # Algebra Module
//!
//! Exact vector and matrix arithmetic over arbitrary-precision integers and rationals.
//! Nothing in here touches floating point.

pub mod determinant;
pub mod gram_schmidt;
pub mod vector_ops;

use crate::errors::KnapsackCryptoError;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

/// An integer lattice vector.
pub type Vector = Vec<BigInt>;
/// A lattice basis, one basis vector per row.
pub type Matrix = Vec<Vector>;
/// A vector with exact rational coordinates.
pub type RationalVector = Vec<BigRational>;
/// A matrix with exact rational entries, one vector per row.
pub type RationalMatrix = Vec<RationalVector>;

pub use determinant::determinant;
pub use gram_schmidt::{gram_schmidt, projection_coefficient};
pub use vector_ops::{dot, scale, scale_by_rational, subtract, to_rational};

/// Creates a zero vector of length `n`.
pub fn create_vector(n: usize) -> Vector {
    vec![BigInt::zero(); n]
}

/// Creates a zero matrix with `rows` rows of length `cols`.
pub fn create_matrix(rows: usize, cols: usize) -> Matrix {
    vec![create_vector(cols); rows]
}

/// Checks that every row of `matrix` has the same length and returns that length
/// (0 for an empty matrix).
///
/// # Errors
///
/// Returns `KnapsackCryptoError::DimensionMismatch` naming the first ragged row.
pub fn ensure_rectangular<T>(matrix: &[Vec<T>]) -> Result<usize, KnapsackCryptoError> {
    let Some(first) = matrix.first() else {
        return Ok(0);
    };
    let cols = first.len();

    for (i, row) in matrix.iter().enumerate() {
        if row.len() != cols {
            return Err(KnapsackCryptoError::DimensionMismatch(format!(
                "Row {} has length {} but expected {}",
                i,
                row.len(),
                cols
            )));
        }
    }

    Ok(cols)
}

/// Renders a matrix row by row with right-aligned entries.
pub fn format_matrix(matrix: &[Vector]) -> String {
    let width = matrix
        .iter()
        .flatten()
        .map(|value| value.to_string().len())
        .max()
        .unwrap_or(0)
        .max(4);

    matrix
        .iter()
        .map(|row| {
            row.iter()
                .map(|value| format!("{:>width$}", value.to_string(), width = width))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_matrix() {
        let matrix = create_matrix(2, 3);
        assert_eq!(matrix.len(), 2);
        assert!(matrix.iter().all(|row| row.len() == 3));
        assert!(matrix.iter().flatten().all(|value| value.is_zero()));
    }

    #[test]
    fn test_ensure_rectangular() {
        let good = vec![vec![1, 2], vec![3, 4]];
        let ragged = vec![vec![1, 2], vec![3]];
        let empty: Vec<Vec<i32>> = Vec::new();

        assert_eq!(ensure_rectangular(&good).unwrap(), 2);
        assert_eq!(ensure_rectangular(&empty).unwrap(), 0);
        assert!(matches!(
            ensure_rectangular(&ragged),
            Err(KnapsackCryptoError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_format_matrix() {
        let matrix: Matrix = vec![
            vec![BigInt::from(1), BigInt::from(-20)],
            vec![BigInt::from(300), BigInt::from(4)],
        ];
        assert_eq!(format_matrix(&matrix), "   1  -20\n 300    4");
    }
}
