//! Exact Gram-Schmidt orthogonalization.
//!
//! Given a basis B = [b_0, ..., b_{n-1}] the orthogonal vectors are
//!
//! ```text
//! u_0 = b_0
//! u_i = b_i - Σ_{j<i} μ_ij u_j
//! μ_ij = <u_j, b_i> / <u_j, u_j>
//! ```
//!
//! Every μ_ij is an exact rational, so the output vectors are pairwise orthogonal with
//! zero tolerance. A zero `u_j` (linearly dependent rows) contributes no projection.

use crate::algebra::vector_ops::{dot, scale, subtract, to_rational};
use crate::algebra::{RationalMatrix, RationalVector, Vector, ensure_rectangular};
use crate::errors::KnapsackCryptoError;

use num_rational::BigRational;
use num_traits::Zero;

/// Returns `<u, v> / <u, u>`, or `None` when `u` is the zero vector.
pub fn projection_coefficient(
    u: &RationalVector,
    v: &RationalVector,
) -> Result<Option<BigRational>, KnapsackCryptoError> {
    let norm = dot(u, u)?;
    if norm.is_zero() {
        return Ok(None);
    }

    Ok(Some(dot(u, v)? / norm))
}

/// Orthogonalizes the rows of `basis`.
///
/// # Errors
///
/// Returns `KnapsackCryptoError::DimensionMismatch` if the rows have different lengths.
pub fn gram_schmidt(basis: &[Vector]) -> Result<RationalMatrix, KnapsackCryptoError> {
    ensure_rectangular(basis)?;

    let mut orthogonal: RationalMatrix = Vec::with_capacity(basis.len());
    for row in basis {
        let b_i = to_rational(row);
        let mut u_i = b_i.clone();

        for u_j in &orthogonal {
            if let Some(mu) = projection_coefficient(u_j, &b_i)? {
                u_i = subtract(&u_i, &scale(u_j, &mu))?;
            }
        }

        orthogonal.push(u_i);
    }

    Ok(orthogonal)
}

#[cfg(test)]
mod tests {
    use super::*;

    use num_bigint::BigInt;
    use quickcheck_macros::quickcheck;

    fn basis(rows: &[&[i64]]) -> Vec<Vector> {
        rows.iter()
            .map(|row| row.iter().map(|&v| BigInt::from(v)).collect())
            .collect()
    }

    fn ratio(num: i64, den: i64) -> BigRational {
        BigRational::new(BigInt::from(num), BigInt::from(den))
    }

    fn assert_pairwise_orthogonal(u: &RationalMatrix) -> Result<(), KnapsackCryptoError> {
        for i in 0..u.len() {
            for j in 0..u.len() {
                if i != j {
                    assert!(dot(&u[i], &u[j])?.is_zero(), "u[{}] . u[{}] != 0", i, j);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_gram_schmidt_basic() -> Result<(), KnapsackCryptoError> {
        let u = gram_schmidt(&basis(&[&[3, 1], &[2, 2]]))?;

        // μ_10 = 8/10, u_1 = (2, 2) - 4/5 (3, 1) = (-2/5, 6/5)
        assert_eq!(u[0], vec![ratio(3, 1), ratio(1, 1)]);
        assert_eq!(u[1], vec![ratio(-2, 5), ratio(6, 5)]);
        assert_pairwise_orthogonal(&u)
    }

    #[test]
    fn test_gram_schmidt_3d() -> Result<(), KnapsackCryptoError> {
        let u = gram_schmidt(&basis(&[&[1, 1, 1], &[-1, 0, 2], &[3, 5, 6]]))?;

        assert_eq!(u.len(), 3);
        assert_pairwise_orthogonal(&u)?;
        for u_i in &u {
            assert!(!dot(u_i, u_i)?.is_zero());
        }
        Ok(())
    }

    #[test]
    fn test_dependent_rows_give_zero_vector() -> Result<(), KnapsackCryptoError> {
        let u = gram_schmidt(&basis(&[&[1, 2], &[2, 4], &[0, 1]]))?;

        assert!(u[1].iter().all(|x| x.is_zero()));
        assert_pairwise_orthogonal(&u)
    }

    #[test]
    fn test_ragged_basis_fails() {
        let result = gram_schmidt(&basis(&[&[1, 2, 3], &[1, 2]]));
        assert!(matches!(
            result,
            Err(KnapsackCryptoError::DimensionMismatch(_))
        ));
    }

    #[quickcheck]
    fn prop_output_is_pairwise_orthogonal(entries: Vec<i8>) -> bool {
        let rows: Vec<Vector> = entries
            .chunks_exact(3)
            .take(4)
            .map(|chunk| chunk.iter().map(|&v| BigInt::from(v)).collect())
            .collect();

        let Ok(u) = gram_schmidt(&rows) else {
            return false;
        };

        (0..u.len()).all(|i| {
            (0..i).all(|j| dot(&u[i], &u[j]).map(|d| d.is_zero()).unwrap_or(false))
        })
    }
}
