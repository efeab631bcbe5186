use crate::algebra::{Vector, ensure_rectangular};
use crate::errors::KnapsackCryptoError;

use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Computes the exact determinant of a square integer matrix using fraction-free
/// Bareiss elimination. Every intermediate division is exact.
///
/// The determinant of the empty matrix is 1.
///
/// # Errors
///
/// Returns `KnapsackCryptoError::DimensionMismatch` if the matrix is not square.
pub fn determinant(matrix: &[Vector]) -> Result<BigInt, KnapsackCryptoError> {
    let n = matrix.len();
    let cols = ensure_rectangular(matrix)?;
    if n == 0 {
        return Ok(BigInt::one());
    }
    if cols != n {
        return Err(KnapsackCryptoError::DimensionMismatch(format!(
            "Determinant needs a square matrix, got {}x{}",
            n, cols
        )));
    }

    let mut a = matrix.to_vec();
    let mut negate = false;
    let mut previous_pivot = BigInt::one();

    for k in 0..n - 1 {
        if a[k][k].is_zero() {
            let Some(pivot_row) = (k + 1..n).find(|&i| !a[i][k].is_zero()) else {
                return Ok(BigInt::zero());
            };
            a.swap(k, pivot_row);
            negate = !negate;
        }

        for i in k + 1..n {
            for j in k + 1..n {
                let numerator = &a[i][j] * &a[k][k] - &a[i][k] * &a[k][j];
                a[i][j] = numerator / &previous_pivot;
            }
        }
        previous_pivot = a[k][k].clone();
    }

    let det = a[n - 1][n - 1].clone();
    Ok(if negate { -det } else { det })
}
