//! Constants shared by the lattice engine and the knapsack key generator.

pub mod constants;
