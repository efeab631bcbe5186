//! Length-checked vector arithmetic shared by integer and rational vectors.

use crate::algebra::{RationalVector, Vector};
use crate::errors::KnapsackCryptoError;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use std::ops::{Mul, Sub};

fn ensure_same_length<T>(a: &[T], b: &[T], operation: &str) -> Result<(), KnapsackCryptoError> {
    if a.len() != b.len() {
        return Err(KnapsackCryptoError::DimensionMismatch(format!(
            "Vector lengths must match for {} ({} vs {})",
            operation,
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

/// Computes the vector difference `c = a - b`.
///
/// # Errors
///
/// Returns `KnapsackCryptoError::DimensionMismatch` if the vectors have different lengths.
pub fn subtract<T>(a: &[T], b: &[T]) -> Result<Vec<T>, KnapsackCryptoError>
where
    for<'x> &'x T: Sub<&'x T, Output = T>,
{
    ensure_same_length(a, b, "subtraction")?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

/// Computes the inner product `<a, b>`.
///
/// # Errors
///
/// Returns `KnapsackCryptoError::DimensionMismatch` if the vectors have different lengths.
pub fn dot<T>(a: &[T], b: &[T]) -> Result<T, KnapsackCryptoError>
where
    T: Zero,
    for<'x> &'x T: Mul<&'x T, Output = T>,
{
    ensure_same_length(a, b, "dot product")?;
    Ok(a.iter().zip(b).fold(T::zero(), |acc, (x, y)| acc + x * y))
}

/// Multiplies every coordinate of `v` by `scalar`.
pub fn scale<T>(v: &[T], scalar: &T) -> Vec<T>
where
    for<'x> &'x T: Mul<&'x T, Output = T>,
{
    v.iter().map(|x| x * scalar).collect()
}

/// Lifts an integer vector into the rationals.
pub fn to_rational(v: &[BigInt]) -> RationalVector {
    v.iter()
        .map(|x| BigRational::from_integer(x.clone()))
        .collect()
}

/// Multiplies an integer vector by a rational scalar, keeping the result exact.
pub fn scale_by_rational(v: &Vector, scalar: &BigRational) -> RationalVector {
    scale(&to_rational(v), scalar)
}
