//! Benchmark runner that outputs a markdown table for the README.
//!
//! Run with: `cargo run --package footprint-bench --bin benchmark_table --release`

use footprint_bench::{
    BenchmarkConfig, BenchmarkResult, format_bytes, format_duration, run_replay,
};
use footprint_lib::prelude::*;
use std::io::Write;
use std::time::Duration;

/// Number of iterations per benchmark for statistical significance.
const ITERATIONS: usize = 3;

fn main() {
    println!("footprint Replay Benchmark");
    println!("==========================\n");

    println!("Running benchmarks ({} iterations each)...\n", ITERATIONS);

    let mut configs = Vec::new();
    for symbol in ["eurusd", "xauusd"] {
        for ticks in [100_000, 1_000_000] {
            for &format in OutputFormat::all() {
                configs.push(BenchmarkConfig {
                    symbol: symbol.to_string(),
                    ticks,
                    format,
                });
            }
        }
    }

    let mut results: Vec<(BenchmarkConfig, Vec<BenchmarkResult>)> = Vec::new();

    for config in configs {
        print!(
            "Benchmarking {} {}k ticks -> {}... ",
            config.symbol,
            config.ticks / 1000,
            config.format
        );
        std::io::stdout().flush().unwrap();

        let mut runs = Vec::new();
        for i in 0..ITERATIONS {
            let temp_dir = tempfile::TempDir::new().unwrap();
            let output = temp_dir
                .path()
                .join(format!("clusters.{}", config.format.extension()));
            match run_replay(&config, &output) {
                Ok(result) => runs.push(result),
                Err(e) => eprintln!("run {} failed: {e}", i + 1),
            }
            print!("R{} ", i + 1);
            std::io::stdout().flush().unwrap();
        }

        results.push((config, runs));
        println!("done");
    }

    println!("\n## Results\n");
    println!("| Symbol | Ticks | Format | Clusters | Aggregate | Ticks/s | Write | Output |");
    println!("|--------|-------|--------|----------|-----------|---------|-------|--------|");

    for (config, runs) in &results {
        let Some(avg) = average_results(runs) else {
            println!(
                "| {} | {}k | {} | FAILED | | | | |",
                config.symbol,
                config.ticks / 1000,
                config.format
            );
            continue;
        };

        println!(
            "| {} | {}k | {} | {} | {} | {:.2}M | {} | {} |",
            config.symbol,
            config.ticks / 1000,
            config.format,
            avg.clusters,
            format_duration(avg.aggregate),
            avg.ticks_per_sec() / 1_000_000.0,
            format_duration(avg.write),
            format_bytes(avg.output_size)
        );
    }

    // Print environment info
    println!("\n### Environment\n");
    println!("- OS: {}", std::env::consts::OS);
    println!("- Arch: {}", std::env::consts::ARCH);
    println!("- footprint version: {}", env!("CARGO_PKG_VERSION"));
}

fn average_results(results: &[BenchmarkResult]) -> Option<BenchmarkResult> {
    let first = results.first()?;
    let n = results.len() as u32;

    Some(BenchmarkResult {
        aggregate: results.iter().map(|r| r.aggregate).sum::<Duration>() / n,
        write: results.iter().map(|r| r.write).sum::<Duration>() / n,
        ticks: first.ticks,
        clusters: first.clusters,
        output_size: results.iter().map(|r| r.output_size).sum::<u64>() / u64::from(n),
    })
}
