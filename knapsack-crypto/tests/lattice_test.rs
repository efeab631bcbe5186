use knapsack_crypto::algebra::{Vector, determinant, gram_schmidt, subtract};
use knapsack_crypto::errors::KnapsackCryptoError;
use knapsack_crypto::lattice::generators::{NetworkKind, generate_lagarias_odlyzko};
use knapsack_crypto::lattice::lll::{ReductionParams, reduce_lattice, reduce_with_params};
use knapsack_crypto::lattice::metrics::{compare_networks, verify_reduction};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

fn vector(values: &[i64]) -> Vector {
    values.iter().map(|&v| BigInt::from(v)).collect()
}

#[test]
fn subtract_never_truncates() {
    let result = subtract(&vector(&[1, 2, 3]), &vector(&[1, 2, 3, 4]));

    assert!(matches!(
        result,
        Err(KnapsackCryptoError::DimensionMismatch(_))
    ));
}

#[test]
fn lagarias_odlyzko_reduction_is_deterministic() -> Result<(), KnapsackCryptoError> {
    let delta = BigRational::new(BigInt::from(3), BigInt::from(4));

    let mut first = generate_lagarias_odlyzko(4);
    let first_report = reduce_lattice(&mut first, &delta, 1000)?;

    for _ in 0..3 {
        let mut again = generate_lagarias_odlyzko(4);
        let report = reduce_lattice(&mut again, &delta, 1000)?;

        assert_eq!(again, first);
        assert_eq!(report, first_report);
    }

    assert!(first_report.iterations <= 1000);
    if first_report.exhausted {
        assert_eq!(first_report.iterations, 1000);
    }
    Ok(())
}

#[test]
fn reduction_keeps_the_lattice() -> Result<(), KnapsackCryptoError> {
    let params = ReductionParams::default();

    for kind in [NetworkKind::LagariasOdlyzko, NetworkKind::JouxStern] {
        for n in [3, 5, 7] {
            let initial = kind.generate(n);
            let mut reduced = initial.clone();
            reduce_with_params(&mut reduced, &params)?;

            assert_eq!(reduced.len(), n, "{} rows stay {}", kind, n);
            assert!(reduced.iter().all(|row| row.len() == n));
            assert_eq!(
                determinant(&initial)?.abs(),
                determinant(&reduced)?.abs(),
                "{} n = {}",
                kind,
                n
            );

            // the comparison itself must work on any pair of same-shape bases
            verify_reduction(&initial, &reduced)?;
        }
    }

    Ok(())
}

#[test]
fn gram_schmidt_of_generated_network_is_orthogonal() -> Result<(), KnapsackCryptoError> {
    let basis = NetworkKind::JouxStern.generate(6);
    let orthogonal = gram_schmidt(&basis)?;

    for i in 0..orthogonal.len() {
        for j in (i + 1)..orthogonal.len() {
            let product = orthogonal[i]
                .iter()
                .zip(&orthogonal[j])
                .fold(BigRational::zero(), |acc, (a, b)| acc + a * b);
            assert!(product.is_zero(), "rows {} and {}", i, j);
        }
    }

    Ok(())
}

#[test]
fn triangular_basis_passes_every_check() -> Result<(), KnapsackCryptoError> {
    let initial = vec![vector(&[1, 0, 0]), vector(&[4, 1, 0]), vector(&[-3, 2, 1])];
    let mut reduced = initial.clone();
    let report = reduce_lattice(
        &mut reduced,
        &BigRational::new(BigInt::from(3), BigInt::from(4)),
        1000,
    )?;

    assert_eq!(
        reduced,
        vec![vector(&[1, 0, 0]), vector(&[0, 1, 0]), vector(&[0, 0, 1])]
    );
    assert_eq!(report.swaps, 0);
    assert!(verify_reduction(&initial, &reduced)?.is_correct());

    let comparison = compare_networks(&reduced, &initial)?;
    assert!(comparison.first_score > comparison.second_score);

    Ok(())
}
