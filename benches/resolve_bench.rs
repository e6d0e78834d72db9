//! Benchmark: descriptor resolution and document binding
//!
//! Measures cached adaptor lookup and full node-to-value binding.
//! Run: cargo bench --bench resolve_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docbind::{bind_struct, from_yaml_str, Binder, TypeDesc};

#[derive(Debug, Clone, Default, PartialEq)]
struct Task {
    name: String,
    retries: i32,
    tags: Vec<String>,
}
bind_struct!(Task {
    name: String,
    retries: i32,
    tags: Vec<String>,
});

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    let binder = Binder::new();
    let nested = TypeDesc::mapping(TypeDesc::string(), TypeDesc::sequence(TypeDesc::int()));
    // warm the cache so the loop measures lookup, not construction
    binder.registry().resolve(&nested).unwrap();

    group.bench_function("cached_nested_descriptor", |b| {
        b.iter(|| {
            let adaptor = binder.registry().resolve(black_box(&nested)).unwrap();
            black_box(adaptor)
        });
    });

    group.finish();
}

fn bench_bind(c: &mut Criterion) {
    let mut group = c.benchmark_group("bind");

    let binder = Binder::new();
    let node = from_yaml_str(
        "name: build\nretries: 3\ntags:\n  - ci\n  - release\n  - nightly\n",
    )
    .unwrap();

    group.bench_function("struct_with_sequence_field", |b| {
        b.iter(|| {
            let task: Task = binder.from_node(black_box(&node)).unwrap();
            black_box(task)
        });
    });

    let node = from_yaml_str("a: [1, 2, 3]\nb: [4, 5]\nc: []\n").unwrap();
    group.bench_function("mapping_of_int_sequences", |b| {
        b.iter(|| {
            let bound: indexmap::IndexMap<String, Vec<i32>> =
                binder.from_node(black_box(&node)).unwrap();
            black_box(bound)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_bind);
criterion_main!(benches);
