//! Deterministic lattice fixtures for the reduction engine.

use crate::algebra::Matrix;

use num_bigint::BigInt;
use num_traits::One;

use std::fmt;

/// The two families of test lattices.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NetworkKind {
    LagariasOdlyzko,
    JouxStern,
}

impl NetworkKind {
    /// Builds the `n x n` lattice of this family.
    pub fn generate(&self, n: usize) -> Matrix {
        match self {
            NetworkKind::LagariasOdlyzko => generate_lagarias_odlyzko(n),
            NetworkKind::JouxStern => generate_joux_stern(n),
        }
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkKind::LagariasOdlyzko => write!(f, "Lagarias-Odlyzko"),
            NetworkKind::JouxStern => write!(f, "Joux-Stern"),
        }
    }
}

/// Unit diagonal, `i*j mod (n+1)` everywhere else.
pub fn generate_lagarias_odlyzko(n: usize) -> Matrix {
    modular_network(n, n + 1)
}

/// Unit diagonal, `i*j mod (n(n-1)/2)` everywhere else.
pub fn generate_joux_stern(n: usize) -> Matrix {
    modular_network(n, n * n.saturating_sub(1) / 2)
}

// The modulus is only consulted off the diagonal, which is empty whenever it would be 0.
fn modular_network(n: usize, modulus: usize) -> Matrix {
    (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        BigInt::one()
                    } else {
                        BigInt::from(i * j % modulus)
                    }
                })
                .collect()
        })
        .collect()
}
