//! # Lattice Module
//!
//! Test lattices, the exact LLL reduction engine and the (floating point) scores used to
//! compare reduced bases.
//!
//! # Example
//!
//! ```
//! # use knapsack_crypto::lattice::generators::generate_lagarias_odlyzko;
//! # use knapsack_crypto::lattice::lll::{ReductionParams, reduce_with_params};
//! let mut basis = generate_lagarias_odlyzko(4);
//! let report = reduce_with_params(&mut basis, &ReductionParams::default()).unwrap();
//! assert_eq!(basis.len(), 4);
//! assert!(report.iterations <= 1000);
//! ```

pub mod generators;
pub mod lll;
pub mod metrics;

pub use generators::{NetworkKind, generate_joux_stern, generate_lagarias_odlyzko};
pub use lll::{ReductionParams, ReductionReport, reduce_lattice, reduce_with_params};
pub use metrics::{
    NetworkComparison, Preference, ReductionCheck, compare_networks, determinant_product,
    efficiency_score, vector_length, verify_reduction,
};
