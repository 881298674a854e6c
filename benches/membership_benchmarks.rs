use murmur::membership::Registry;
use murmur::settings::RotationOrder;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn cluster(size: usize) -> Vec<String> {
    (0..size).map(|n| format!("10.0.{}.{}:7000", n / 256, n % 256)).collect()
}

fn benchmark_merge_known_members(c: &mut Criterion) {
    let members = cluster(1000);
    let registry = Registry::new("127.0.0.1:7000", None, RotationOrder::Insertion);
    registry.merge(members.clone()).unwrap();

    c.bench_function("merge_known_members", |b| {
        b.iter(|| black_box(registry.merge(members.clone()).unwrap()))
    });
}

fn benchmark_next_target(c: &mut Criterion) {
    let registry = Registry::new("127.0.0.1:7000", None, RotationOrder::Insertion);
    registry.merge(cluster(1000)).unwrap();

    c.bench_function("next_target", |b| {
        b.iter(|| black_box(registry.next_target().unwrap()))
    });
}

fn benchmark_snapshot_encode(c: &mut Criterion) {
    let registry = Registry::new("127.0.0.1:7000", None, RotationOrder::Insertion);
    registry.merge(cluster(1000)).unwrap();

    c.bench_function("snapshot_encode", |b| {
        b.iter(|| black_box(registry.snapshot().unwrap().to_json().unwrap()))
    });
}

criterion_group!(
    benches,
    benchmark_merge_known_members,
    benchmark_next_target,
    benchmark_snapshot_encode
);
criterion_main!(benches);
