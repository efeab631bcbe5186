use crate::errors::KnapsackCryptoError;

use serde::{Deserialize, Serialize};

/// Key generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyGenParams {
    /// Nominal key size in bytes. The key holds `dimension()` elements.
    pub byte_size: usize,
    /// Number of `(a, b)` rounds applied to the super-increasing sequence.
    pub iterations: usize,
}

impl KeyGenParams {
    /// Creates a new KeyGenParams instance with the given parameters.
    pub fn try_with(byte_size: usize, iterations: usize) -> Result<Self, KnapsackCryptoError> {
        if byte_size < 2 {
            return Err(KnapsackCryptoError::InvalidParameter(format!(
                "Key size must be at least 2 bytes, got {}",
                byte_size
            )));
        }

        if iterations < 1 {
            return Err(KnapsackCryptoError::InvalidParameter(
                "Number of iterations must be > 0".to_string(),
            ));
        }

        Ok(Self {
            byte_size,
            iterations,
        })
    }

    /// Number of key elements, `ceil(sqrt(8 * byte_size / 2))`.
    ///
    /// This is also the longest message the key can carry, in bits.
    pub fn dimension(&self) -> usize {
        let half_bits = self.byte_size.saturating_mul(4);
        let root = num_integer::sqrt(half_bits);
        if root * root < half_bits {
            root + 1
        } else {
            root
        }
    }

    /// Longest message, in characters, that fits a key of this size.
    pub fn max_message_len(&self) -> usize {
        self.dimension() / 8
    }
}
