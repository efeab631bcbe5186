//! # Arith Module
//!
//! Big-integer number theory used by key generation and decryption: modular inverses,
//! uniform sampling below a bound and probabilistic prime generation.

pub mod helper;
pub mod primes;
pub mod random;

pub use helper::mod_inverse;
pub use primes::{is_probable_prime, random_prime};
pub use random::{random_below, random_in_range};
