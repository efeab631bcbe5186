#![allow(non_snake_case)]

pub mod algebra;
pub mod arith;
pub mod cryptanalysis;
pub mod errors;
pub mod knapsack;
pub mod lattice;
pub mod preset;

pub use cryptanalysis::attempt_cryptanalysis;
pub use errors::KnapsackCryptoError;
pub use knapsack::keys::{PrivateKey, PublicKey, decrypt, encrypt, generate_keys};
pub use knapsack::params::KeyGenParams;
pub use lattice::lll::{ReductionParams, ReductionReport, reduce_lattice};
