// Query-path benchmarks over a synthetic artifact universe.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use propx::{
    ArtifactStore, DistanceTable, PriceRange, QueryFacade, SimilarityMatrix,
};
use rand::prelude::*;
use std::sync::Arc;

fn random_similarity(n: usize) -> SimilarityMatrix {
    let mut rng = rand::rng();
    let data: Vec<f32> = (0..n * n).map(|_| rng.random_range(0.0f32..1.0f32)).collect();
    SimilarityMatrix::new(n, data, None).unwrap()
}

fn synthetic_facade(n: usize, locations: usize) -> QueryFacade {
    let mut rng = rand::rng();
    let ids: Vec<String> = (0..n).map(|i| format!("P{}", i)).collect();
    let location_names: Vec<String> = (0..locations).map(|i| format!("Loc_{}", i)).collect();
    let meters: Vec<f64> = (0..n * locations)
        .map(|_| rng.random_range(100.0..20_000.0))
        .collect();
    let distances = DistanceTable::new(ids, location_names, meters).unwrap();

    let store = ArtifactStore::from_parts(
        None,
        None,
        Some(distances),
        Some([
            random_similarity(n),
            random_similarity(n),
            random_similarity(n),
        ]),
    );
    QueryFacade::new(Arc::new(store))
}

fn benchmark_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");

    for size in [100, 1000, 2000].iter() {
        group.bench_with_input(BenchmarkId::new("propx", size), size, |b, &size| {
            let facade = synthetic_facade(size, 10);
            // First call pays the one-time matrix combination.
            facade.recommend("P0", 5).unwrap();

            b.iter(|| {
                let results = facade.recommend(black_box("P0"), black_box(5)).unwrap();
                black_box(results);
            });
        });
    }

    group.finish();
}

fn benchmark_radius_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("radius_search");

    for size in [100, 1000, 2000].iter() {
        group.bench_with_input(BenchmarkId::new("propx", size), size, |b, &size| {
            let facade = synthetic_facade(size, 10);

            b.iter(|| {
                let results = facade
                    .search_radius(black_box("Loc_0"), black_box(5.0))
                    .unwrap();
                black_box(results);
            });
        });
    }

    group.finish();
}

fn benchmark_price_band(c: &mut Criterion) {
    c.bench_function("price_band", |b| {
        b.iter(|| {
            let range = PriceRange::around(black_box(2.98));
            black_box(range.formatted_range());
        });
    });
}

criterion_group!(
    benches,
    benchmark_recommend,
    benchmark_radius_search,
    benchmark_price_band
);
criterion_main!(benches);
