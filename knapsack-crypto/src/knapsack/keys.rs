use crate::algebra::Vector;
use crate::arith::mod_inverse;
use crate::errors::KnapsackCryptoError;
use crate::knapsack::codec::{bits_to_string, string_to_bits};
use crate::knapsack::params::KeyGenParams;
use crate::knapsack::sequence::{
    generate_key_parameters, generate_super_increasing_sequence, is_super_increasing, mul_mod,
};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use rand::Rng;

use serde::{Deserialize, Serialize};

use log::{debug, info, warn};

use std::fmt;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKey {
    /// The secret super-increasing sequence.
    pub R: Vector,
    /// Multiplier of each transform round.
    pub A: Vec<BigInt>,
    /// Modulus of each transform round.
    pub B: Vec<BigInt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    /// The disguised sequence.
    pub M: Vector,
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("R", &format_args!("<{} redacted elements>", self.R.len()))
            .field("A", &self.A)
            .field("B", &self.B)
            .finish()
    }
}

impl PrivateKey {
    /// Generates a fresh key from the thread-local generator.
    pub fn try_with(params: &KeyGenParams) -> Result<Self, KnapsackCryptoError> {
        let (private_key, _) = generate_keys(params, &mut rand::rng())?;
        Ok(private_key)
    }

    /// Assembles a key from its parts, checking that they can decrypt anything at all.
    ///
    /// # Errors
    ///
    /// * `InvalidParameter` if `R` has fewer than 2 elements, is not super-increasing, or
    ///   the chain is empty.
    /// * `DimensionMismatch` if `A` and `B` differ in length.
    /// * `ModularInverseFailure` if some `a[i]` is not invertible modulo `b[i]`.
    pub fn from_parts(
        R: Vector,
        A: Vec<BigInt>,
        B: Vec<BigInt>,
    ) -> Result<Self, KnapsackCryptoError> {
        if R.len() < 2 {
            return Err(KnapsackCryptoError::InvalidParameter(format!(
                "Private sequence needs at least 2 elements, got {}",
                R.len()
            )));
        }

        if !is_super_increasing(&R) {
            return Err(KnapsackCryptoError::InvalidParameter(
                "Private sequence is not super-increasing".to_string(),
            ));
        }

        if A.len() != B.len() {
            return Err(KnapsackCryptoError::DimensionMismatch(format!(
                "Transform chain has {} multipliers but {} moduli",
                A.len(),
                B.len()
            )));
        }

        if A.is_empty() {
            return Err(KnapsackCryptoError::InvalidParameter(
                "Transform chain must have at least one round".to_string(),
            ));
        }

        for (round, (a, b)) in A.iter().zip(&B).enumerate() {
            mod_inverse(a, b).map_err(|e| {
                KnapsackCryptoError::ModularInverseFailure(format!("Round {}: {}", round, e))
            })?;
        }

        Ok(Self { R, A, B })
    }

    /// Number of key elements, i.e. the longest message in bits.
    pub fn dimension(&self) -> usize {
        self.R.len()
    }

    /// Re-derives the public sequence by replaying the transform chain over `R`.
    pub fn get_public_key(&self) -> Result<PublicKey, KnapsackCryptoError> {
        if self.A.len() != self.B.len() {
            return Err(KnapsackCryptoError::DimensionMismatch(format!(
                "Transform chain has {} multipliers but {} moduli",
                self.A.len(),
                self.B.len()
            )));
        }

        let M = self
            .A
            .iter()
            .zip(&self.B)
            .fold(self.R.clone(), |m, (a, b)| mul_mod(&m, a, b));

        Ok(PublicKey { M })
    }

    pub fn decrypt(&self, ciphertext: &BigInt) -> Result<String, KnapsackCryptoError> {
        decrypt(self, ciphertext)
    }
}

impl PublicKey {
    pub fn dimension(&self) -> usize {
        self.M.len()
    }

    pub fn encrypt(&self, message: &str) -> Result<BigInt, KnapsackCryptoError> {
        encrypt(self, message)
    }

    pub fn to_json(&self) -> Result<String, KnapsackCryptoError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, KnapsackCryptoError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Generates a key pair.
///
/// # Errors
///
/// Fails with `GenerationFailure` if no suitable coprime pair could be found for some
/// round; parameter errors are ruled out by `KeyGenParams::try_with`.
pub fn generate_keys<R: Rng + ?Sized>(
    params: &KeyGenParams,
    rng: &mut R,
) -> Result<(PrivateKey, PublicKey), KnapsackCryptoError> {
    let n = params.dimension();
    debug!(
        "Generating {}-element knapsack key ({} bytes, {} rounds)",
        n, params.byte_size, params.iterations
    );

    let r = generate_super_increasing_sequence(n, rng)?;
    let chain = generate_key_parameters(&r, params.iterations, rng)?;

    info!(
        "Generated knapsack key: {} elements, {} rounds, largest modulus {} bits",
        n,
        params.iterations,
        chain.B.iter().map(|b| b.bits()).max().unwrap_or(0)
    );

    let private_key = PrivateKey {
        R: r,
        A: chain.A,
        B: chain.B,
    };
    let public_key = PublicKey { M: chain.M };

    Ok((private_key, public_key))
}

/// Encrypts `message` as the sum of the public elements selected by its bits.
///
/// # Errors
///
/// * `EncodingError` for characters above U+00FF.
/// * `DimensionMismatch` if the message has more bits than the key has elements.
pub fn encrypt(public_key: &PublicKey, message: &str) -> Result<BigInt, KnapsackCryptoError> {
    let bits = string_to_bits(message)?;

    if bits.len() > public_key.M.len() {
        return Err(KnapsackCryptoError::DimensionMismatch(format!(
            "Message needs {} bits but the public key only has {} elements",
            bits.len(),
            public_key.M.len()
        )));
    }

    Ok(bits
        .iter()
        .zip(&public_key.M)
        .filter(|(bit, _)| **bit == 1)
        .map(|(_, m)| m)
        .sum())
}

/// Undoes the transform chain in reverse order, then decodes the super-increasing sum
/// greedily from the largest element down.
///
/// Trailing NUL characters, which come from padding the key length to whole bytes, are
/// removed from the result.
///
/// # Errors
///
/// * `InvalidParameter` if the ciphertext is negative.
/// * `DimensionMismatch` if `A` and `B` differ in length.
/// * `ModularInverseFailure` if some `a[i]` is not invertible modulo `b[i]`.
pub fn decrypt(
    private_key: &PrivateKey,
    ciphertext: &BigInt,
) -> Result<String, KnapsackCryptoError> {
    if ciphertext.is_negative() {
        return Err(KnapsackCryptoError::InvalidParameter(format!(
            "Ciphertext must be non-negative, got {}",
            ciphertext
        )));
    }

    if private_key.A.len() != private_key.B.len() {
        return Err(KnapsackCryptoError::DimensionMismatch(format!(
            "Transform chain has {} multipliers but {} moduli",
            private_key.A.len(),
            private_key.B.len()
        )));
    }

    let mut s = ciphertext.clone();
    for (round, (a, b)) in private_key.A.iter().zip(&private_key.B).enumerate().rev() {
        let a_inv = mod_inverse(a, b).map_err(|e| {
            KnapsackCryptoError::ModularInverseFailure(format!("Decrypt round {}: {}", round, e))
        })?;
        s = (s * a_inv).mod_floor(b);
    }

    let mut bits = vec![0u8; private_key.R.len()];
    for (i, r) in private_key.R.iter().enumerate().rev() {
        if s >= *r {
            bits[i] = 1;
            s -= r;
        }
    }

    if !s.is_zero() {
        warn!(
            "Decryption left a remainder of {}, key and ciphertext do not match",
            s
        );
    }

    let padded_len = bits.len().next_multiple_of(8);
    bits.resize(padded_len, 0);

    let message = bits_to_string(&bits)?;
    Ok(message.trim_end_matches('\0').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::arith::random_prime;

    use num_traits::One;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TEST_SEED: u64 = 2024;

    fn keys(
        byte_size: usize,
        iterations: usize,
    ) -> Result<(PrivateKey, PublicKey), KnapsackCryptoError> {
        let params = KeyGenParams::try_with(byte_size, iterations)?;
        let mut rng = StdRng::seed_from_u64(TEST_SEED);
        generate_keys(&params, &mut rng)
    }

    #[test]
    fn test_round_trip() -> Result<(), KnapsackCryptoError> {
        let (private_key, public_key) = keys(64, 3)?;
        assert_eq!(public_key.dimension(), 16);
        assert!(is_super_increasing(&private_key.R));

        let ciphertext = encrypt(&public_key, "AB")?;
        assert_eq!(decrypt(&private_key, &ciphertext)?, "AB");
        Ok(())
    }

    #[test]
    fn test_short_message_is_padded() -> Result<(), KnapsackCryptoError> {
        // 20 elements: "A" fills 8 bits, the rest decode as NUL and are stripped
        let (private_key, public_key) = keys(100, 2)?;
        let ciphertext = public_key.encrypt("A")?;
        assert_eq!(private_key.decrypt(&ciphertext)?, "A");

        assert_eq!(decrypt(&private_key, &encrypt(&public_key, "")?)?, "");
        Ok(())
    }

    #[test]
    fn test_trailing_nul_is_stripped() -> Result<(), KnapsackCryptoError> {
        // "A\0" fills all 16 elements; padding NULs and message NULs are indistinguishable
        let (private_key, public_key) = keys(64, 3)?;
        let ciphertext = encrypt(&public_key, "A\0")?;
        assert_eq!(decrypt(&private_key, &ciphertext)?, "A");

        let ciphertext = encrypt(&public_key, "\0A")?;
        assert_eq!(decrypt(&private_key, &ciphertext)?, "\0A");
        Ok(())
    }

    #[test]
    fn test_message_longer_than_key() -> Result<(), KnapsackCryptoError> {
        let (_, public_key) = keys(16, 3)?;
        assert_eq!(public_key.dimension(), 8);
        assert!(matches!(
            encrypt(&public_key, "AB"),
            Err(KnapsackCryptoError::DimensionMismatch(_))
        ));
        Ok(())
    }

    #[test]
    fn test_public_key_is_reproducible() -> Result<(), KnapsackCryptoError> {
        let (private_key, public_key) = keys(32, 4)?;
        assert_eq!(private_key.get_public_key()?, public_key);
        Ok(())
    }

    #[test]
    fn test_debug_redacts_secret_sequence() -> Result<(), KnapsackCryptoError> {
        let (private_key, _) = keys(16, 1)?;
        let printed = format!("{:?}", private_key);

        assert!(printed.contains("R: <8 redacted elements>"));
        Ok(())
    }

    #[test]
    fn test_public_key_json() -> Result<(), KnapsackCryptoError> {
        let (_, public_key) = keys(16, 2)?;
        let json = public_key.to_json()?;

        assert_eq!(PublicKey::from_json(&json)?, public_key);
        assert!(matches!(
            PublicKey::from_json("{\"M\": 3}"),
            Err(KnapsackCryptoError::SerializationError(_))
        ));
        Ok(())
    }

    #[test]
    fn test_from_parts() -> Result<(), KnapsackCryptoError> {
        let mut rng = StdRng::seed_from_u64(TEST_SEED);
        let r: Vector = [5, 11, 33, 99].iter().map(|&v| BigInt::from(v)).collect();
        let b = random_prime(10, &mut rng)?;

        let key = PrivateKey::from_parts(r.clone(), vec![BigInt::from(7)], vec![b.clone()])?;
        assert_eq!(key.dimension(), 4);

        assert!(matches!(
            PrivateKey::from_parts(vec![BigInt::one()], vec![BigInt::one()], vec![b.clone()]),
            Err(KnapsackCryptoError::InvalidParameter(_))
        ));
        assert!(matches!(
            PrivateKey::from_parts(r.clone(), vec![BigInt::one()], vec![]),
            Err(KnapsackCryptoError::DimensionMismatch(_))
        ));
        assert!(matches!(
            PrivateKey::from_parts(r, vec![BigInt::from(6)], vec![BigInt::from(9)]),
            Err(KnapsackCryptoError::ModularInverseFailure(_))
        ));
        Ok(())
    }

    #[test]
    fn test_decrypt_with_broken_chain() -> Result<(), KnapsackCryptoError> {
        let (mut private_key, public_key) = keys(16, 2)?;
        let ciphertext = encrypt(&public_key, "k")?;

        private_key.A[1] = private_key.B[1].clone();
        assert!(matches!(
            decrypt(&private_key, &ciphertext),
            Err(KnapsackCryptoError::ModularInverseFailure(_))
        ));
        assert!(matches!(
            decrypt(&private_key, &BigInt::from(-1)),
            Err(KnapsackCryptoError::InvalidParameter(_))
        ));
        Ok(())
    }

    #[quickcheck]
    fn prop_round_trip(seed: u64, bytes: Vec<u8>) -> TestResult {
        let message: String = bytes.iter().take(4).copied().map(char::from).collect();
        if message.ends_with('\0') {
            return TestResult::discard();
        }

        let Ok(params) = KeyGenParams::try_with(256, 2) else {
            return TestResult::failed();
        };
        let mut rng = StdRng::seed_from_u64(seed);

        let decrypted = generate_keys(&params, &mut rng).and_then(|(private_key, public_key)| {
            let ciphertext = encrypt(&public_key, &message)?;
            decrypt(&private_key, &ciphertext)
        });

        TestResult::from_bool(decrypted.ok().as_deref() == Some(message.as_str()))
    }
}
