use crate::errors::KnapsackCryptoError;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::One;

/// Computes the modular multiplicative inverse `a^-1 mod modulus`, normalized into
/// `[0, modulus)`.
///
/// # Errors
///
/// Returns `KnapsackCryptoError::ModularInverseFailure` if `modulus <= 1` or if
/// `gcd(a, modulus) != 1` (this includes `a ≡ 0`).
pub fn mod_inverse(a: &BigInt, modulus: &BigInt) -> Result<BigInt, KnapsackCryptoError> {
    if *modulus <= BigInt::one() {
        return Err(KnapsackCryptoError::ModularInverseFailure(format!(
            "Modulus must be greater than 1, got {}",
            modulus
        )));
    }

    let a_norm = a.mod_floor(modulus);
    a_norm.modinv(modulus).ok_or_else(|| {
        KnapsackCryptoError::ModularInverseFailure(format!(
            "Modular inverse does not exist for {} mod {} (gcd={})",
            a_norm,
            modulus,
            a_norm.gcd(modulus)
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(value: i64) -> BigInt {
        BigInt::from(value)
    }

    #[test]
    fn test_mod_inverse() -> Result<(), KnapsackCryptoError> {
        assert_eq!(mod_inverse(&big(3), &big(10))?, big(7));
        assert_eq!(mod_inverse(&big(5), &big(11))?, big(9));
        assert_eq!(mod_inverse(&big(-3), &big(10))?, big(3));
        assert_eq!(mod_inverse(&big(1), &big(2))?, big(1));
        Ok(())
    }

    #[test]
    fn test_mod_inverse_large() -> Result<(), KnapsackCryptoError> {
        let modulus: BigInt = (BigInt::one() << 127usize) - 1u32;
        let a = BigInt::from(123_456_789_u64);
        let inverse = mod_inverse(&a, &modulus)?;
        assert!((a * inverse).mod_floor(&modulus).is_one());
        Ok(())
    }

    #[test]
    fn test_mod_inverse_failures() {
        assert!(matches!(
            mod_inverse(&big(2), &big(10)),
            Err(KnapsackCryptoError::ModularInverseFailure(_))
        ));
        assert!(mod_inverse(&big(0), &big(7)).is_err());
        assert!(mod_inverse(&big(14), &big(7)).is_err());
        assert!(mod_inverse(&big(3), &big(1)).is_err());
    }
}
