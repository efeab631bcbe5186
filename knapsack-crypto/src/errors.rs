#[derive(thiserror::Error, Debug)]
pub enum KnapsackCryptoError {
    /// Two vectors (or a vector and a matrix row) disagree in length.
    #[error("DimensionMismatch: {0}")]
    DimensionMismatch(String),
    /// A caller-supplied parameter is outside its admissible range.
    #[error("InvalidParameter: {0}")]
    InvalidParameter(String),
    /// Random search (primes, coprime pairs) ran out of attempts.
    #[error("GenerationFailure: {0}")]
    GenerationFailure(String),
    /// Text could not be mapped to bytes, or a bit string is not byte aligned.
    #[error("EncodingError: {0}")]
    EncodingError(String),
    /// An element of the key chain has no inverse modulo its partner (gcd != 1).
    #[error("ModularInverseFailure: {0}")]
    ModularInverseFailure(String),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Base64 decoding failed: {0}")]
    Base64Error(#[from] base64::DecodeError),
}
