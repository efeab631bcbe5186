use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use knapsack_crypto::lattice::generators::NetworkKind;
use knapsack_crypto::lattice::lll::{ReductionParams, reduce_with_params};

fn bench_reduction(c: &mut Criterion) {
    let params = ReductionParams::default();

    for kind in [NetworkKind::LagariasOdlyzko, NetworkKind::JouxStern] {
        let mut group = c.benchmark_group(format!("LLL {}", kind));

        for n in [4usize, 6, 8] {
            let basis = kind.generate(n);

            group.bench_with_input(BenchmarkId::from_parameter(n), &basis, |b, basis| {
                b.iter(|| {
                    let mut work = basis.clone();
                    reduce_with_params(black_box(&mut work), &params).expect("reduce");
                    work
                });
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_reduction);
criterion_main!(benches);
