//! Message <-> bit string conversion and ciphertext export.
//!
//! Characters are treated as single bytes (Latin-1): every `char` up to U+00FF maps to
//! the byte of the same value, anything above is rejected. Bits are emitted most
//! significant first, one `u8` (0 or 1) per bit.

use crate::errors::KnapsackCryptoError;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use num_bigint::BigInt;

/// Converts `message` to its bit string, 8 bits per character.
///
/// # Errors
///
/// Returns `KnapsackCryptoError::EncodingError` for characters above U+00FF.
pub fn string_to_bits(message: &str) -> Result<Vec<u8>, KnapsackCryptoError> {
    let mut bits = Vec::with_capacity(message.len() * 8);

    for c in message.chars() {
        let byte = u8::try_from(u32::from(c)).map_err(|_| {
            KnapsackCryptoError::EncodingError(format!(
                "Invalid character '{}' (U+{:04X}) in message",
                c,
                u32::from(c)
            ))
        })?;

        bits.extend((0..8).rev().map(|shift| (byte >> shift) & 1));
    }

    Ok(bits)
}

/// Converts a bit string back to text, 8 bits per character.
///
/// # Errors
///
/// Returns `KnapsackCryptoError::EncodingError` if the length is not a multiple of 8 or
/// a bit is neither 0 nor 1.
pub fn bits_to_string(bits: &[u8]) -> Result<String, KnapsackCryptoError> {
    if bits.len() % 8 != 0 {
        return Err(KnapsackCryptoError::EncodingError(format!(
            "Bit string length must be a multiple of 8, got {}",
            bits.len()
        )));
    }

    bits.chunks(8)
        .map(|chunk| {
            chunk.iter().try_fold(0u8, |byte, &bit| match bit {
                0 | 1 => Ok((byte << 1) | bit),
                _ => Err(KnapsackCryptoError::EncodingError(format!(
                    "Invalid bit value {}",
                    bit
                ))),
            })
        })
        .map(|byte| byte.map(char::from))
        .collect()
}

pub fn ciphertext_to_base64(ciphertext: &BigInt) -> String {
    STANDARD.encode(ciphertext.to_signed_bytes_be())
}

pub fn ciphertext_from_base64(encoded: &str) -> Result<BigInt, KnapsackCryptoError> {
    let bytes = STANDARD.decode(encoded.trim())?;
    Ok(BigInt::from_signed_bytes_be(&bytes))
}
