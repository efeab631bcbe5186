//! # Knapsack Module
//!
//! The Merkle-Hellman knapsack cryptosystem: a secret super-increasing sequence `R` is
//! disguised by a chain of modular multiplications `m -> a * m mod b` into the public
//! sequence `M`. A message is encrypted as the subset sum of `M` selected by its bits.
//!
//! # Example
//!
//! ```
//! # use knapsack_crypto::knapsack::keys::{decrypt, encrypt, generate_keys};
//! # use knapsack_crypto::knapsack::params::KeyGenParams;
//! # use rand::SeedableRng;
//! let params = KeyGenParams::try_with(64, 3).unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let (private_key, public_key) = generate_keys(&params, &mut rng).unwrap();
//!
//! let ciphertext = encrypt(&public_key, "AB").unwrap();
//! assert_eq!(decrypt(&private_key, &ciphertext).unwrap(), "AB");
//! ```

pub mod codec;
pub mod keys;
pub mod params;
pub mod sequence;

pub use keys::{PrivateKey, PublicKey, decrypt, encrypt, generate_keys};
pub use params::KeyGenParams;
