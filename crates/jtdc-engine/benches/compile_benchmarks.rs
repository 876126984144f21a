//! Benchmarks for compiling and running `type` validators
//!
//! Compiling many timestamp fields in one session exercises the shared
//! helper lookup; validation measures per-check evaluation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jtdc_core::{Data, TypeTag};
use jtdc_engine::Compiler;
use serde_json::{json, Map, Value};

/// Generate N fields cycling through every type tag
fn generate_fields(num_fields: usize) -> Map<String, Value> {
    (0..num_fields)
        .map(|i| {
            let tag = TypeTag::ALL[i % TypeTag::ALL.len()];
            let node = json!({"type": tag.as_str(), "nullable": i % 2 == 0});
            (format!("field_{}", i), node)
        })
        .collect()
}

/// Generate N timestamp fields
fn generate_timestamp_fields(num_fields: usize) -> Map<String, Value> {
    (0..num_fields)
        .map(|i| (format!("at_{}", i), json!({"type": "timestamp"})))
        .collect()
}

fn generate_document(fields: &Map<String, Value>) -> Data {
    let doc: Map<String, Value> = fields
        .keys()
        .map(|k| (k.clone(), json!("2024-03-01T12:00:00Z")))
        .collect();
    Data::from(Value::Object(doc))
}

fn bench_compile_timestamps(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_timestamps");

    for size in [10, 100, 1000] {
        let fields = generate_timestamp_fields(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &fields, |b, fields| {
            b.iter(|| {
                let validator = Compiler::default().compile_fields(black_box(fields)).unwrap();
                black_box(validator)
            });
        });
    }

    group.finish();
}

fn bench_compile_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_mixed");

    for size in [11, 110, 1100] {
        let fields = generate_fields(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &fields, |b, fields| {
            b.iter(|| Compiler::default().compile_fields(black_box(fields)).unwrap());
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    for size in [10, 100, 1000] {
        let fields = generate_timestamp_fields(size);
        let validator = Compiler::default().compile_fields(&fields).unwrap();
        let doc = generate_document(&fields);

        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| validator.validate(black_box(doc)).unwrap());
        });
    }

    group.finish();
}

fn bench_render_source(c: &mut Criterion) {
    let fields = generate_fields(110);
    let validator = Compiler::default().compile_fields(&fields).unwrap();

    c.bench_function("render_source", |b| {
        b.iter(|| black_box(validator.source()));
    });
}

criterion_group!(
    benches,
    bench_compile_timestamps,
    bench_compile_mixed,
    bench_validate,
    bench_render_source
);
criterion_main!(benches);
