//! Uniform sampling of big integers from an injected random source.

use crate::errors::KnapsackCryptoError;

use num_bigint::{BigInt, Sign};
use num_traits::Signed;

use rand::Rng;

/// Draws a uniformly distributed integer from `[0, bound)`.
///
/// Random bytes are masked down to the bit length of `bound` and rejected until they
/// land below it, so each draw succeeds with probability at least 1/2.
///
/// # Errors
///
/// Returns `KnapsackCryptoError::InvalidParameter` if `bound` is not positive.
pub fn random_below<R: Rng + ?Sized>(
    rng: &mut R,
    bound: &BigInt,
) -> Result<BigInt, KnapsackCryptoError> {
    if !bound.is_positive() {
        return Err(KnapsackCryptoError::InvalidParameter(format!(
            "Sampling bound must be positive, got {}",
            bound
        )));
    }

    let bits = bound.bits();
    let byte_len = bits.div_ceil(8) as usize;
    let excess_bits = (byte_len as u64 * 8 - bits) as u32;
    let mut buf = vec![0u8; byte_len];

    loop {
        rng.fill_bytes(&mut buf);
        buf[0] &= 0xffu8 >> excess_bits;

        let candidate = BigInt::from_bytes_be(Sign::Plus, &buf);
        if &candidate < bound {
            return Ok(candidate);
        }
    }
}

/// Draws a uniformly distributed integer from `[low, high)`.
pub fn random_in_range<R: Rng + ?Sized>(
    rng: &mut R,
    low: &BigInt,
    high: &BigInt,
) -> Result<BigInt, KnapsackCryptoError> {
    if high <= low {
        return Err(KnapsackCryptoError::InvalidParameter(format!(
            "Empty sampling range [{}, {})",
            low, high
        )));
    }

    let offset = random_below(rng, &(high - low))?;
    Ok(low + offset)
}
