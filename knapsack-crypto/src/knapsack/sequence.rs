use crate::algebra::Vector;
use crate::arith::{random_in_range, random_prime};
use crate::errors::KnapsackCryptoError;
use crate::preset::constants::COPRIME_ATTEMPTS;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use rand::Rng;

use log::debug;

/// The modular transform chain produced by key generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParameterChain {
    /// Multipliers, one per round.
    pub A: Vec<BigInt>,
    /// Prime moduli, one per round.
    pub B: Vec<BigInt>,
    /// The disguised sequence after the last round.
    pub M: Vector,
}

/// Generates a super-increasing sequence of length `n`.
///
/// The first element is `2^n + offset` and every following one is twice the running sum
/// plus `offset`, each offset drawn from `[1, sqrt(previous element))`.
///
/// # Errors
///
/// Returns `KnapsackCryptoError::InvalidParameter` if `n < 2`.
pub fn generate_super_increasing_sequence<R: Rng + ?Sized>(
    n: usize,
    rng: &mut R,
) -> Result<Vector, KnapsackCryptoError> {
    if n < 2 {
        return Err(KnapsackCryptoError::InvalidParameter(format!(
            "Super-increasing sequence needs at least 2 elements, got {}",
            n
        )));
    }

    let one = BigInt::one();
    let two_pow_n = BigInt::one() << n;

    let first = &two_pow_n + random_in_range(rng, &one, &two_pow_n.sqrt())?;
    let mut sum = first.clone();
    let mut sequence = Vec::with_capacity(n);
    sequence.push(first);

    for i in 1..n {
        let offset = random_in_range(rng, &one, &sequence[i - 1].sqrt())?;
        let next = &sum * 2u32 + offset;
        sum += &next;
        sequence.push(next);
    }

    Ok(sequence)
}

/// Checks `r[i] > 2 * sum(r[0..i))` for every `i > 0` and that every element is positive.
pub fn is_super_increasing(sequence: &[BigInt]) -> bool {
    let mut sum = BigInt::zero();

    for r in sequence {
        if !r.is_positive() || *r <= &sum * 2u32 {
            return false;
        }
        sum += r;
    }

    true
}

/// Picks a prime `b` of one bit more than `n` (so `b > n`) and a multiplier `a` coprime to it.
///
/// # Errors
///
/// * `InvalidParameter` if `n` is not positive.
/// * `GenerationFailure` if no prime was found or no coprime `a` within
///   `COPRIME_ATTEMPTS` draws.
pub fn generate_coprimes<R: Rng + ?Sized>(
    n: &BigInt,
    rng: &mut R,
) -> Result<(BigInt, BigInt), KnapsackCryptoError> {
    if !n.is_positive() {
        return Err(KnapsackCryptoError::InvalidParameter(format!(
            "Coprime pair bound must be positive, got {}",
            n
        )));
    }

    let b = random_prime(n.bits() + 1, rng)?;
    let one = BigInt::one();

    for _ in 0..COPRIME_ATTEMPTS {
        let a = random_in_range(rng, &one, &b)?;
        if a.gcd(&b).is_one() {
            return Ok((a, b));
        }
    }

    Err(KnapsackCryptoError::GenerationFailure(format!(
        "Failed to find a multiplier coprime to {} after {} attempts",
        b, COPRIME_ATTEMPTS
    )))
}

/// `m[i] = r[i] * a mod b`
pub fn mul_mod(r: &[BigInt], a: &BigInt, b: &BigInt) -> Vector {
    r.iter().map(|ri| (ri * a).mod_floor(b)).collect()
}

/// Applies `iterations` rounds of `m -> a * m mod b` to `r`, each round with a fresh
/// coprime pair whose modulus exceeds the sum of the current sequence.
pub fn generate_key_parameters<R: Rng + ?Sized>(
    r: &[BigInt],
    iterations: usize,
    rng: &mut R,
) -> Result<KeyParameterChain, KnapsackCryptoError> {
    if iterations < 1 {
        return Err(KnapsackCryptoError::InvalidParameter(
            "Number of iterations must be > 0".to_string(),
        ));
    }

    let mut chain = KeyParameterChain {
        A: Vec::with_capacity(iterations),
        B: Vec::with_capacity(iterations),
        M: r.to_vec(),
    };

    for round in 0..iterations {
        let sum: BigInt = chain.M.iter().sum();

        let (a, b) = generate_coprimes(&sum, rng).map_err(|e| {
            KnapsackCryptoError::GenerationFailure(format!("Key parameters round {}: {}", round, e))
        })?;
        debug!("Key parameters round {}: modulus of {} bits", round, b.bits());

        chain.M = mul_mod(&chain.M, &a, &b);
        chain.A.push(a);
        chain.B.push(b);
    }

    Ok(chain)
}
