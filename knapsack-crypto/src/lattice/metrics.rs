//! Quality scores for reduced bases.
//!
//! These are reporting heuristics only. They use `f64` and never feed back into the
//! reduction or decoding algorithms.

use crate::algebra::vector_ops::dot;
use crate::algebra::{Vector, determinant, ensure_rectangular};
use crate::errors::KnapsackCryptoError;

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use itertools::Itertools;

use std::cmp::Ordering;

/// Bits kept when a big integer is brought into `f64` range.
const F64_WINDOW_BITS: u64 = 512;

/// Product of the diagonal entries.
///
/// A cheap stand-in for the determinant that is only meaningful for triangular bases;
/// use [`determinant`] for the real volume.
///
/// # Errors
///
/// Returns `KnapsackCryptoError::DimensionMismatch` if row `i` has no entry `i`.
pub fn determinant_product(matrix: &[Vector]) -> Result<BigInt, KnapsackCryptoError> {
    let mut product = BigInt::one();
    for (i, row) in matrix.iter().enumerate() {
        let Some(entry) = row.get(i) else {
            return Err(KnapsackCryptoError::DimensionMismatch(format!(
                "Row {} has length {} and no diagonal entry",
                i,
                row.len()
            )));
        };
        product *= entry;
    }
    Ok(product)
}

/// Euclidean length of an integer vector.
pub fn vector_length(v: &[BigInt]) -> f64 {
    let norm_sq: BigInt = v.iter().map(|x| x * x).sum();

    // keep ~106 significant bits and an even shift so the square root stays exact in scale
    let shift = norm_sq.bits().saturating_sub(106) & !1;
    let head = (&norm_sq >> shift).to_f64().unwrap_or(f64::INFINITY);
    head.sqrt() * 2f64.powi((shift / 2) as i32)
}

/// Approximates `num / den` without overflowing intermediate conversions.
fn ratio_to_f64(num: &BigInt, den: &BigInt) -> f64 {
    let shift = num.bits().max(den.bits()).saturating_sub(F64_WINDOW_BITS);
    let num = (num >> shift).to_f64().unwrap_or(f64::INFINITY);
    let den = (den >> shift).to_f64().unwrap_or(f64::INFINITY);
    num / den
}

/// Cosine of the angle between two vectors, 0 if either is the zero vector.
pub fn cos_theta(a: &[BigInt], b: &[BigInt]) -> Result<f64, KnapsackCryptoError> {
    let product = dot(a, b)?;
    let norms = dot(a, a)? * dot(b, b)?;
    if norms.is_zero() {
        return Ok(0.0);
    }

    let magnitude = ratio_to_f64(&(&product * &product), &norms).sqrt();
    Ok(if product.is_negative() {
        -magnitude
    } else {
        magnitude
    })
}

/// `Σ |b_i| / Σ_{i<j} |cos θ_ij|`. Higher means shorter relative to how skewed the rows
/// are; a perfectly orthogonal basis scores infinity.
pub fn efficiency_score(matrix: &[Vector]) -> Result<f64, KnapsackCryptoError> {
    ensure_rectangular(matrix)?;

    let total_length: f64 = matrix.iter().map(|row| vector_length(row)).sum();

    let mut total_skew = 0.0;
    for (i, j) in (0..matrix.len()).tuple_combinations() {
        total_skew += cos_theta(&matrix[i], &matrix[j])?.abs();
    }

    if total_skew == 0.0 {
        return Ok(if total_length == 0.0 { 0.0 } else { f64::INFINITY });
    }
    Ok(total_length / total_skew)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Preference {
    First,
    Second,
    Tie,
}

/// Efficiency scores of two bases and which one is better.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkComparison {
    pub first_score: f64,
    pub second_score: f64,
    pub preferred: Preference,
}

pub fn compare_networks(
    first: &[Vector],
    second: &[Vector],
) -> Result<NetworkComparison, KnapsackCryptoError> {
    let first_score = efficiency_score(first)?;
    let second_score = efficiency_score(second)?;

    let preferred = match first_score.partial_cmp(&second_score) {
        Some(Ordering::Greater) => Preference::First,
        Some(Ordering::Less) => Preference::Second,
        _ => Preference::Tie,
    };

    Ok(NetworkComparison {
        first_score,
        second_score,
        preferred,
    })
}

/// Outcome of comparing a basis with its reduced form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReductionCheck {
    /// Diagonal products agree.
    pub determinant_preserved: bool,
    /// No reduced row is longer than the row it replaced.
    pub vectors_shorter: bool,
    /// No pair of reduced rows is more skewed than the same pair before.
    pub more_orthogonal: bool,
    /// `|det|` agrees exactly; `None` when the bases are not square.
    pub volume_preserved: Option<bool>,
}

impl ReductionCheck {
    /// The three heuristic checks all pass. `volume_preserved` is informational.
    pub fn is_correct(&self) -> bool {
        self.determinant_preserved && self.vectors_shorter && self.more_orthogonal
    }
}

/// Compares an initial basis with its reduced form.
///
/// # Errors
///
/// Returns `KnapsackCryptoError::DimensionMismatch` if the two bases differ in shape.
pub fn verify_reduction(
    initial: &[Vector],
    reduced: &[Vector],
) -> Result<ReductionCheck, KnapsackCryptoError> {
    let initial_cols = ensure_rectangular(initial)?;
    let reduced_cols = ensure_rectangular(reduced)?;
    if initial.len() != reduced.len() || initial_cols != reduced_cols {
        return Err(KnapsackCryptoError::DimensionMismatch(format!(
            "Cannot compare a {}x{} basis with a {}x{} basis",
            initial.len(),
            initial_cols,
            reduced.len(),
            reduced_cols
        )));
    }

    let determinant_preserved = determinant_product(initial)? == determinant_product(reduced)?;

    let vectors_shorter = initial
        .iter()
        .zip(reduced)
        .all(|(before, after)| vector_length(after) <= vector_length(before));

    let mut more_orthogonal = true;
    for (i, j) in (0..initial.len()).tuple_combinations() {
        let before = cos_theta(&initial[i], &initial[j])?.abs();
        let after = cos_theta(&reduced[i], &reduced[j])?.abs();
        if after > before {
            more_orthogonal = false;
            break;
        }
    }

    let volume_preserved = if initial.len() == initial_cols {
        Some(determinant(initial)?.abs() == determinant(reduced)?.abs())
    } else {
        None
    };

    Ok(ReductionCheck {
        determinant_preserved,
        vectors_shorter,
        more_orthogonal,
        volume_preserved,
    })
}
