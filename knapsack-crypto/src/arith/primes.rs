//! Probabilistic prime generation for the knapsack key chain.

use crate::arith::random::{random_below, random_in_range};
use crate::errors::KnapsackCryptoError;
use crate::preset::constants::{MILLER_RABIN_ROUNDS, PRIME_ATTEMPTS_PER_BIT, SMALL_PRIMES};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

use rand::Rng;

/// Miller-Rabin primality test with `rounds` random witnesses.
///
/// Candidates below 1000 are decided exactly by the small-prime table; larger ones are
/// first trial-divided by it.
pub fn is_probable_prime<R: Rng + ?Sized>(
    n: &BigInt,
    rounds: usize,
    rng: &mut R,
) -> Result<bool, KnapsackCryptoError> {
    let two = BigInt::from(2);
    if *n < two {
        return Ok(false);
    }

    for p in SMALL_PRIMES.iter() {
        if n == p {
            return Ok(true);
        }
        if (n % p).is_zero() {
            return Ok(false);
        }
    }

    // Write n-1 as 2^r * d
    let n_minus_one: BigInt = n - 1u32;
    let mut d = n_minus_one.clone();
    let mut r = 0usize;
    while d.is_even() {
        d >>= 1usize;
        r += 1;
    }

    'witness: for _ in 0..rounds {
        let a = random_in_range(rng, &two, &n_minus_one)?;
        let mut x = a.modpow(&d, n);

        if x.is_one() || x == n_minus_one {
            continue 'witness;
        }

        for _ in 1..r {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }

        return Ok(false);
    }

    Ok(true)
}

/// Generates a random prime of exactly `bits` bits (top bit set).
///
/// # Errors
///
/// * `InvalidParameter` if `bits < 2` (no prime fits).
/// * `GenerationFailure` if no prime was found within `bits * PRIME_ATTEMPTS_PER_BIT`
///   candidates.
pub fn random_prime<R: Rng + ?Sized>(
    bits: u64,
    rng: &mut R,
) -> Result<BigInt, KnapsackCryptoError> {
    if bits < 2 {
        return Err(KnapsackCryptoError::InvalidParameter(format!(
            "Prime bit length must be at least 2, got {}",
            bits
        )));
    }

    let top_bit = BigInt::one() << (bits - 1);
    let attempts = bits as usize * PRIME_ATTEMPTS_PER_BIT;

    for _ in 0..attempts {
        let mut candidate = &top_bit + random_below(rng, &top_bit)?;
        if candidate.is_even() {
            candidate += 1u32;
        }

        if is_probable_prime(&candidate, MILLER_RABIN_ROUNDS, rng)? {
            return Ok(candidate);
        }
    }

    Err(KnapsackCryptoError::GenerationFailure(format!(
        "No {}-bit prime found after {} candidates",
        bits, attempts
    )))
}
