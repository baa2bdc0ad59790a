//! Benchmarks for loading and storing copy-ratio collections
//!
//! Measures the two halves of a round trip across collection sizes:
//! - load: header parse, schema check, per-line decode
//! - store: per-record encode and write, plain and gzip
//!
//! Run with: cargo bench --bench collection_io

use biotable::records::{CopyRatio, CopyRatioCodec, CopyRatioCollection};
use biotable::{GenomicInterval, TsvOptions};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tempfile::TempDir;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// Generate evenly spaced 1 kb bins over a few contigs
fn generate_collection(n: usize) -> CopyRatioCollection {
    let records = (0..n)
        .map(|i| {
            let contig = format!("chr{}", i % 22 + 1);
            let start = (i as u64 / 22) * 1_000 + 1;
            let interval = GenomicInterval::new(contig, start, start + 999).unwrap();
            CopyRatio::new(interval, ((i % 200) as f64 - 100.0) / 50.0)
        })
        .collect();

    CopyRatioCollection::new("bench_sample", records, CopyRatioCodec::default()).unwrap()
}

/// Benchmark decoding an in-memory table
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for size in SIZES.iter() {
        let mut table = Vec::new();
        generate_collection(*size).write_to(&mut table).unwrap();

        group.throughput(Throughput::Bytes(table.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                CopyRatioCollection::from_reader(
                    black_box(table.as_slice()),
                    CopyRatioCodec::default(),
                    &TsvOptions::default(),
                )
                .unwrap()
            })
        });
    }

    group.finish();
}

/// Benchmark encoding to an in-memory buffer
fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");

    for size in SIZES.iter() {
        let collection = generate_collection(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut out = Vec::new();
                black_box(&collection).write_to(&mut out).unwrap();
                out
            })
        });
    }

    group.finish();
}

/// Benchmark file round trips, plain vs gzip
fn bench_file_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_round_trip");
    group.sample_size(20);

    let dir = TempDir::new().unwrap();
    let collection = generate_collection(10_000);

    for name in ["bins.tsv", "bins.tsv.gz"] {
        let path = dir.path().join(name);

        group.bench_function(name, |b| {
            b.iter(|| {
                collection.write(&path).unwrap();
                CopyRatioCollection::from_path(&path, CopyRatioCodec::default()).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load, bench_store, bench_file_round_trip);
criterion_main!(benches);
