use criterion::{Criterion, criterion_group, criterion_main};
use geo_locality::FixedPointCoordinate;
use std::hint::black_box;

fn distance_benchmark(c: &mut Criterion) {
    let a = FixedPointCoordinate::new(52_516_275, 13_377_704);
    let b = FixedPointCoordinate::new(52_520_008, 13_392_954);

    c.bench_function("approximate_distance", |bench| {
        bench.iter(|| FixedPointCoordinate::approximate_distance(black_box(&a), black_box(&b)));
    });

    c.bench_function("approximate_euclidean_distance", |bench| {
        bench.iter(|| {
            FixedPointCoordinate::approximate_euclidean_distance(black_box(&a), black_box(&b))
        });
    });
}

criterion_group!(benches, distance_benchmark);
criterion_main!(benches);
