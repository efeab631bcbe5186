//! Lattice attack on a Merkle-Hellman public key.
//!
//! The public sequence is placed on the diagonal of an otherwise zero basis, the basis is
//! LLL-reduced and the reduced diagonal is read back as a candidate secret sequence. The
//! real transform chain `(A, B)` is reused, only `R` is replaced. Whether the candidate
//! decrypts anything meaningful depends on how the reduction reorders the rows; nothing
//! here guarantees recovery of the real key.

use crate::algebra::{Matrix, create_matrix};
use crate::errors::KnapsackCryptoError;
use crate::knapsack::keys::{PrivateKey, PublicKey, decrypt};
use crate::lattice::lll::{ReductionParams, ReductionReport, reduce_with_params};

use num_bigint::BigInt;
use num_rational::BigRational;

use log::{debug, info};

/// Reduction settings for the attack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CryptanalysisParams {
    pub reduction: ReductionParams,
}

impl CryptanalysisParams {
    pub fn try_with(
        delta: BigRational,
        max_iterations: usize,
    ) -> Result<Self, KnapsackCryptoError> {
        Ok(Self {
            reduction: ReductionParams::try_with(delta, max_iterations)?,
        })
    }
}

/// `diag(M)`
pub fn build_attack_lattice(public_key: &PublicKey) -> Matrix {
    let n = public_key.M.len();
    let mut basis = create_matrix(n, n);

    for (i, m) in public_key.M.iter().enumerate() {
        basis[i][i] = m.clone();
    }

    basis
}

/// Reduces the attack lattice and assembles the approximate private key from its diagonal
/// and the given transform chain.
pub fn recover_approximate_key(
    public_key: &PublicKey,
    private_key: &PrivateKey,
    params: &CryptanalysisParams,
) -> Result<(PrivateKey, ReductionReport), KnapsackCryptoError> {
    let mut basis = build_attack_lattice(public_key);
    let report = reduce_with_params(&mut basis, &params.reduction)?;

    let R: Vec<BigInt> = basis
        .iter()
        .enumerate()
        .map(|(i, row)| row[i].clone())
        .collect();

    debug!(
        "Cryptanalysis: reduced {}-element attack lattice with {} swaps",
        R.len(),
        report.swaps
    );

    let approximate_key = PrivateKey {
        R,
        A: private_key.A.clone(),
        B: private_key.B.clone(),
    };

    Ok((approximate_key, report))
}

/// Decrypts `ciphertext` with a key recovered from `public_key` alone plus the transform
/// chain of `private_key`, using the default reduction settings.
///
/// The secret sequence of `private_key` is never read.
pub fn attempt_cryptanalysis(
    ciphertext: &BigInt,
    public_key: &PublicKey,
    private_key: &PrivateKey,
) -> Result<String, KnapsackCryptoError> {
    attempt_cryptanalysis_with(
        ciphertext,
        public_key,
        private_key,
        &CryptanalysisParams::default(),
    )
}

pub fn attempt_cryptanalysis_with(
    ciphertext: &BigInt,
    public_key: &PublicKey,
    private_key: &PrivateKey,
    params: &CryptanalysisParams,
) -> Result<String, KnapsackCryptoError> {
    let (approximate_key, report) = recover_approximate_key(public_key, private_key, params)?;
    let plaintext = decrypt(&approximate_key, ciphertext)?;

    info!(
        "Cryptanalysis: recovered {} characters after {} LLL iterations{}",
        plaintext.chars().count(),
        report.iterations,
        if report.exhausted { " (bound reached)" } else { "" }
    );

    Ok(plaintext)
}
