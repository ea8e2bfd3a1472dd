//! Benchmarks for distance and proximity filtering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trailside_geo::{distance, filter_nearby, filter_nearby_parallel, Coordinate, PointOfInterest, Track};

fn create_points(count: usize) -> Vec<PointOfInterest> {
    (0..count)
        .map(|i| {
            // Spread points over central Seoul
            let lat = 37.45 + (i as f64 * 0.001) % 0.15;
            let lng = 126.90 + (i as f64 * 0.0013) % 0.20;
            PointOfInterest::new(format!("restroom-{}", i), Coordinate::new(lat, lng))
        })
        .collect()
}

fn create_track(count: usize) -> Track {
    // ~3 m between vertices, like a recorded GPS track
    let points = (0..count)
        .map(|i| Coordinate::new(37.50 + i as f64 * 0.00002, 126.95 + i as f64 * 0.00002))
        .collect();
    Track::new(points).expect("non-empty track")
}

fn bench_single_distance(c: &mut Criterion) {
    let a = Coordinate::new(37.5663, 126.9779);
    let b = Coordinate::new(37.5759, 126.9768);

    c.bench_function("haversine_single", |bench| {
        bench.iter(|| distance(black_box(&a), black_box(&b)))
    });
}

fn bench_filter_by_stride(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_by_stride");
    let points = create_points(2000);
    let track = create_track(12_000);

    for stride in [1usize, 10, 60].iter() {
        let sampled = track.downsample(*stride).expect("valid stride");
        group.bench_with_input(BenchmarkId::new("sequential", stride), stride, |b, _| {
            b.iter(|| filter_nearby(black_box(&points), black_box(sampled.points()), 40.0))
        });
    }

    group.finish();
}

fn bench_parallel_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_filter");
    let track = create_track(12_000).downsample(60).expect("valid stride");

    for size in [100, 1000, 10000].iter() {
        let points = create_points(*size);
        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, _| {
            b.iter(|| filter_nearby(black_box(&points), black_box(track.points()), 40.0))
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), size, |b, _| {
            b.iter(|| filter_nearby_parallel(black_box(&points), black_box(track.points()), 40.0))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_distance,
    bench_filter_by_stride,
    bench_parallel_filter
);
criterion_main!(benches);
