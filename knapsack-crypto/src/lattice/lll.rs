//! LLL lattice basis reduction over exact rationals.
//!
//! The engine keeps the Gram-Schmidt vectors `U` of the current basis `B` and walks an
//! index `k` from 1 upwards:
//!
//! 1. size-reduce `B[k]` against `B[k-1], ..., B[0]` with `q = trunc(<U[j], B[k]> / <U[j], U[j]>)`;
//! 2. test `δ <U[k-1], U[k-1]> <= <U[k], U[k]> + <U[k-1], U[k]>`;
//! 3. on failure swap `B[k]` and `B[k-1]` and step back to `max(k-1, 1)`, otherwise advance.
//!
//! `U` is recomputed from scratch after every change of `B`.
//!
//! Note that step 2 is an additive variant of the textbook Lovász condition, which uses
//! `μ² <U[k-1], U[k-1]>` in place of `<U[k-1], U[k]>`. Because `U` is exactly orthogonal the
//! extra term is always 0 here, so the polynomial-time termination bound of canonical LLL
//! does not carry over; the iteration bound is what guarantees that `reduce` returns.

use crate::algebra::gram_schmidt::{gram_schmidt, projection_coefficient};
use crate::algebra::vector_ops::{dot, scale, subtract, to_rational};
use crate::algebra::{Matrix, RationalMatrix, ensure_rectangular};
use crate::errors::KnapsackCryptoError;
use crate::preset::constants::{DEFAULT_DELTA, DEFAULT_MAX_ITERATIONS, DELTA_LOWER_BOUND};

use num_rational::BigRational;
use num_traits::{One, Zero};

use log::{debug, info, warn};

/// Parameters of one reduction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReductionParams {
    /// Lovász parameter δ, strictly between 1/4 and 1.
    pub delta: BigRational,
    /// Passive safety valve on the number of outer loop iterations.
    pub max_iterations: usize,
}

impl Default for ReductionParams {
    fn default() -> Self {
        Self {
            delta: DEFAULT_DELTA.clone(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl ReductionParams {
    /// Creates validated reduction parameters.
    ///
    /// # Errors
    ///
    /// Returns `KnapsackCryptoError::InvalidParameter` if `delta` is not in the open
    /// interval (1/4, 1) or if `max_iterations` is 0.
    pub fn try_with(delta: BigRational, max_iterations: usize) -> Result<Self, KnapsackCryptoError> {
        if delta <= *DELTA_LOWER_BOUND || delta >= BigRational::one() {
            return Err(KnapsackCryptoError::InvalidParameter(format!(
                "Lovász parameter must satisfy 1/4 < delta < 1, got {}",
                delta
            )));
        }

        if max_iterations == 0 {
            return Err(KnapsackCryptoError::InvalidParameter(
                "Iteration bound must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            delta,
            max_iterations,
        })
    }
}

/// What happened during one reduction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReductionReport {
    /// Outer loop iterations performed.
    pub iterations: usize,
    /// Adjacent row swaps triggered by the Lovász test.
    pub swaps: usize,
    /// Non-trivial size reduction steps (`q != 0`).
    pub size_reductions: usize,
    /// `true` if the run stopped on the iteration bound rather than on `k >= n`.
    pub exhausted: bool,
}

/// Reduces `basis` in place with Lovász parameter `delta` and at most `max_iterations`
/// outer iterations.
///
/// # Errors
///
/// * `InvalidParameter` if `delta` is outside (1/4, 1) or `max_iterations` is 0.
/// * `DimensionMismatch` if the rows of `basis` have different lengths.
pub fn reduce_lattice(
    basis: &mut Matrix,
    delta: &BigRational,
    max_iterations: usize,
) -> Result<ReductionReport, KnapsackCryptoError> {
    let params = ReductionParams::try_with(delta.clone(), max_iterations)?;
    reduce_with_params(basis, &params)
}

/// Reduces `basis` in place using already validated parameters.
///
/// Hitting the iteration bound is not an error: the partially reduced basis is left in
/// `basis` and the report is flagged as `exhausted`.
pub fn reduce_with_params(
    basis: &mut Matrix,
    params: &ReductionParams,
) -> Result<ReductionReport, KnapsackCryptoError> {
    let n = basis.len();
    let dimension = ensure_rectangular(basis)?;
    let mut report = ReductionReport::default();

    if n < 2 {
        return Ok(report);
    }

    debug!(
        "LLL: reducing {}x{} basis, delta = {}, bound = {}",
        n, dimension, params.delta, params.max_iterations
    );

    let mut orthogonal = gram_schmidt(basis)?;
    let mut k = 1usize;

    while k < n && report.iterations < params.max_iterations {
        report.iterations += 1;

        for j in (0..k).rev() {
            if size_reduce(basis, &orthogonal, k, j)? {
                report.size_reductions += 1;
                orthogonal = gram_schmidt(basis)?;
            }
        }

        if lovasz_condition_holds(&orthogonal, k, &params.delta)? {
            k += 1;
        } else {
            basis.swap(k, k - 1);
            report.swaps += 1;
            debug!("LLL: swapped rows {} and {}", k - 1, k);

            k = (k - 1).max(1);
            orthogonal = gram_schmidt(basis)?;
        }
    }

    report.exhausted = k < n;
    if report.exhausted {
        warn!(
            "LLL: iteration bound {} reached at k = {} of {}, returning partially reduced basis",
            params.max_iterations, k, n
        );
    } else {
        info!(
            "LLL: reduced {}x{} basis in {} iterations ({} swaps, {} size reductions)",
            n, dimension, report.iterations, report.swaps, report.size_reductions
        );
    }

    Ok(report)
}

/// Subtracts `trunc(μ_kj) * B[j]` from `B[k]`. Returns whether `B[k]` changed.
fn size_reduce(
    basis: &mut Matrix,
    orthogonal: &RationalMatrix,
    k: usize,
    j: usize,
) -> Result<bool, KnapsackCryptoError> {
    let b_k = to_rational(&basis[k]);
    let Some(mu) = projection_coefficient(&orthogonal[j], &b_k)? else {
        return Ok(false);
    };

    let q = mu.to_integer();
    if q.is_zero() {
        return Ok(false);
    }

    let shift = scale(&basis[j], &q);
    basis[k] = subtract(&basis[k], &shift)?;
    Ok(true)
}

/// `δ <U[k-1], U[k-1]> <= <U[k], U[k]> + <U[k-1], U[k]>`
fn lovasz_condition_holds(
    orthogonal: &RationalMatrix,
    k: usize,
    delta: &BigRational,
) -> Result<bool, KnapsackCryptoError> {
    let previous = &orthogonal[k - 1];
    let current = &orthogonal[k];

    let lhs = delta * dot(previous, previous)?;
    let rhs = dot(current, current)? + dot(previous, current)?;
    Ok(lhs <= rhs)
}
