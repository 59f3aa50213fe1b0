use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use posecloud_core::{PointCloud, PointWithInfo, PointWithInfoVec};

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("aligned_push");
    for size in [1_000, 100_000, 1_000_000] {
        group.bench_with_input(BenchmarkId::new("aligned_vec", size), &size, |b, &n| {
            b.iter(|| {
                let mut v = PointWithInfoVec::new();
                for i in 0..n {
                    v.push(PointWithInfo::new([i as f32, 0.0, 0.0, 1.0], [0.0; 4], 1.0));
                }
                v
            })
        });
        group.bench_with_input(BenchmarkId::new("std_vec", size), &size, |b, &n| {
            b.iter(|| {
                let mut v = Vec::new();
                for i in 0..n {
                    v.push(PointWithInfo::new([i as f32, 0.0, 0.0, 1.0], [0.0; 4], 1.0));
                }
                v
            })
        });
    }
    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("cloud_resize");
    for size in [10_000, 1_000_000] {
        group.bench_with_input(BenchmarkId::new("posecloud", size), &size, |b, &n| {
            b.iter(|| PointCloud::with_len(n))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_push, bench_resize);
criterion_main!(benches);
