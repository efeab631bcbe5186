use lazy_static::lazy_static;
use num_bigint::BigInt;
use num_rational::BigRational;

/// Iteration bound used when the caller does not pick one.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// How many `a` candidates are tried against a fixed prime `b` before giving up.
pub const COPRIME_ATTEMPTS: usize = 10;

/// Random witnesses per Miller-Rabin test (error probability below 4^-20).
pub const MILLER_RABIN_ROUNDS: usize = 20;

/// Prime search budget, multiplied by the requested bit length.
pub const PRIME_ATTEMPTS_PER_BIT: usize = 64;

/// Sieve limit for the trial-division table.
const SMALL_PRIME_LIMIT: usize = 1000;

lazy_static! {
    /// Lovász parameter 3/4.
    pub static ref DEFAULT_DELTA: BigRational =
        BigRational::new(BigInt::from(3), BigInt::from(4));

    /// Exclusive lower bound for any admissible Lovász parameter.
    pub static ref DELTA_LOWER_BOUND: BigRational =
        BigRational::new(BigInt::from(1), BigInt::from(4));

    /// Primes below 1000, used to discard most composite candidates cheaply.
    pub static ref SMALL_PRIMES: Vec<BigInt> = {
        let mut composite = vec![false; SMALL_PRIME_LIMIT];
        let mut primes = Vec::new();

        for i in 2..SMALL_PRIME_LIMIT {
            if composite[i] {
                continue;
            }
            primes.push(BigInt::from(i));

            let mut multiple = i * i;
            while multiple < SMALL_PRIME_LIMIT {
                composite[multiple] = true;
                multiple += i;
            }
        }

        primes
    };
}
