//! Aggregation and output throughput benchmarks.
//!
//! Run with: `cargo bench --package footprint-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use footprint_bench::{BenchmarkConfig, generate_ticks, replay};
use footprint_lib::prelude::*;
use std::hint::black_box;
use std::io;

/// Tick counts to replay.
const SIZES: &[usize] = &[10_000, 100_000];

/// Presets with different level sizes and thresholds.
const SYMBOLS: &[&str] = &["eurusd", "xauusd", "btcusd"];

fn process_tick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_tick");

    for &symbol in SYMBOLS {
        let config = BenchmarkConfig {
            symbol: symbol.to_string(),
            ticks: 100_000,
            ..Default::default()
        };
        let ticks = generate_ticks(&config);
        let cluster_config = SymbolRegistry::global().cluster_config_for(symbol);

        group.throughput(Throughput::Elements(ticks.len() as u64));
        group.bench_with_input(BenchmarkId::new("live", symbol), &ticks, |b, ticks| {
            b.iter(|| {
                let mut aggregator = ClusterAggregator::new(cluster_config).unwrap();
                let mut closed = 0usize;
                for tick in ticks {
                    if aggregator.process_tick(black_box(tick)).is_some() {
                        closed += 1;
                    }
                }
                black_box(closed)
            });
        });
    }

    group.finish();
}

fn load_from_history_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_from_history");

    for &size in SIZES {
        let config = BenchmarkConfig {
            ticks: size,
            ..Default::default()
        };
        let ticks = generate_ticks(&config);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("eurusd", size), &ticks, |b, ticks| {
            b.iter(|| black_box(replay("eurusd", ticks)));
        });
    }

    group.finish();
}

fn write_benchmark(c: &mut Criterion) {
    let config = BenchmarkConfig::default();
    let ticks = generate_ticks(&config);
    let clusters = replay(&config.symbol, &ticks);

    let mut group = c.benchmark_group("write_levels");
    group.throughput(Throughput::Elements(
        clusters.iter().map(|c| c.price_levels.len() as u64).sum(),
    ));

    group.bench_function("csv", |b| {
        b.iter(|| CsvFormatter::new().write_levels(&clusters, io::sink()).unwrap());
    });
    group.bench_function("ndjson", |b| {
        b.iter(|| JsonFormatter::ndjson().write_levels(&clusters, io::sink()).unwrap());
    });
    group.bench_function("parquet", |b| {
        b.iter(|| ParquetFormatter::new().write_levels(&clusters, io::sink()).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    process_tick_benchmark,
    load_from_history_benchmark,
    write_benchmark
);
criterion_main!(benches);
