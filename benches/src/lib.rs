//! Benchmark utilities for footprint.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use footprint_lib::{
    Category, Cluster, ClusterAggregator, CsvFormatter, FormatError, Formatter, JsonFormatter,
    OutputFormat, ParquetFormatter, Side, SymbolRegistry, SymbolSpec, Tick,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Deterministic random-walk tick source.
///
/// Uses a xorshift generator so every run replays the same stream.
#[derive(Debug, Clone)]
pub struct TickGenerator {
    state: u64,
    symbol: String,
    price: f64,
    step: f64,
    base_volume: f64,
    timestamp: DateTime<Utc>,
}

impl TickGenerator {
    /// Creates a generator walking around `start_price` in steps of `step`.
    pub fn new(symbol: &str, start_price: f64, step: f64, base_volume: f64, seed: u64) -> Self {
        Self {
            state: seed.max(1),
            symbol: symbol.to_uppercase(),
            price: start_price,
            step,
            base_volume,
            timestamp: Utc
                .with_ymd_and_hms(2024, 1, 2, 0, 0, 0)
                .single()
                .unwrap_or_default(),
        }
    }

    /// Creates a generator for a symbol preset, starting from a typical quote.
    pub fn for_symbol(spec: &SymbolSpec, seed: u64) -> Self {
        let start_price = match spec.category() {
            Category::Forex if spec.digits() <= 3 => 150.0,
            Category::Forex => 1.08,
            Category::Commodity => 2000.0,
            Category::Index => 17_000.0,
            Category::Crypto => 45_000.0,
        };
        Self::new(
            spec.id(),
            start_price,
            spec.point(),
            spec.base_volume(),
            seed,
        )
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Produces the next tick.
    pub fn next_tick(&mut self) -> Tick {
        let r = self.next_u64();

        let side = if r & 1 == 0 { Side::Buy } else { Side::Sell };
        // -2..=+2 steps
        let moves = ((r >> 1) % 5) as f64 - 2.0;
        self.price = (self.price + moves * self.step).max(self.step);

        let volume = self.base_volume * (1 + (r >> 8) % 10) as f64 / 5.0;
        self.timestamp += TimeDelta::milliseconds(1 + ((r >> 16) % 250) as i64);

        Tick::new(self.symbol.as_str(), self.price, volume, side, self.timestamp)
    }

    /// Produces `n` ticks.
    pub fn take(&mut self, n: usize) -> Vec<Tick> {
        (0..n).map(|_| self.next_tick()).collect()
    }
}

/// Configuration for a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Symbol preset to take the cluster config from (e.g., "eurusd").
    pub symbol: String,
    /// Number of synthetic ticks to replay.
    pub ticks: usize,
    /// Output format.
    pub format: OutputFormat,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            symbol: "eurusd".to_string(),
            ticks: 100_000,
            format: OutputFormat::Csv,
        }
    }
}

/// Result of a single benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Time spent aggregating.
    pub aggregate: Duration,
    /// Time spent writing output.
    pub write: Duration,
    /// Number of ticks replayed.
    pub ticks: u64,
    /// Number of clusters produced.
    pub clusters: u64,
    /// Size of the output file in bytes.
    pub output_size: u64,
}

impl BenchmarkResult {
    /// Calculate aggregation throughput in ticks per second.
    pub fn ticks_per_sec(&self) -> f64 {
        let secs = self.aggregate.as_secs_f64();
        if secs > 0.0 {
            self.ticks as f64 / secs
        } else {
            0.0
        }
    }
}

/// Generates the synthetic tick stream for a config.
pub fn generate_ticks(config: &BenchmarkConfig) -> Vec<Tick> {
    let registry = SymbolRegistry::global();
    let mut generator = registry.get(&config.symbol).map_or_else(
        || TickGenerator::new(&config.symbol, 1.08, 0.00001, 5.0, 42),
        |spec| TickGenerator::for_symbol(spec, 42),
    );
    generator.take(config.ticks)
}

/// Replays `ticks` into clusters with the symbol's preset config.
pub fn replay(symbol: &str, ticks: &[Tick]) -> Vec<Arc<Cluster>> {
    let config = SymbolRegistry::global().cluster_config_for(symbol);
    let Ok(mut aggregator) = ClusterAggregator::new(config) else {
        return Vec::new();
    };
    aggregator.load_from_history(ticks);
    aggregator.finish()
}

/// Writes clusters in `format`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_clusters(
    clusters: &[Arc<Cluster>],
    format: OutputFormat,
    path: &Path,
) -> Result<(), FormatError> {
    let writer = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Csv => CsvFormatter::new().write_clusters(clusters, writer),
        OutputFormat::Json => JsonFormatter::new().write_clusters(clusters, writer),
        OutputFormat::Ndjson => JsonFormatter::ndjson().write_clusters(clusters, writer),
        OutputFormat::Parquet => ParquetFormatter::new().write_clusters(clusters, writer),
    }
}

/// Run a full replay benchmark: generate, aggregate, write to `output_path`.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn run_replay(
    config: &BenchmarkConfig,
    output_path: &Path,
) -> Result<BenchmarkResult, FormatError> {
    let ticks = generate_ticks(config);

    let start = Instant::now();
    let clusters = replay(&config.symbol, &ticks);
    let aggregate = start.elapsed();

    let start = Instant::now();
    write_clusters(&clusters, config.format, output_path)?;
    let write = start.elapsed();

    let output_size = std::fs::metadata(output_path).map(|m| m.len()).unwrap_or(0);

    Ok(BenchmarkResult {
        aggregate,
        write,
        ticks: ticks.len() as u64,
        clusters: clusters.len() as u64,
        output_size,
    })
}

/// Format duration for display.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}

/// Format bytes for display.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_is_deterministic() {
        let a = TickGenerator::new("eurusd", 1.08, 0.00001, 5.0, 7).take(100);
        let b = TickGenerator::new("eurusd", 1.08, 0.00001, 5.0, 7).take(100);
        assert_eq!(a, b);
        assert!(a.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert!(a.iter().all(|t| t.price > 0.0 && t.volume > 0.0));
        assert_eq!(a[0].symbol, "EURUSD");
    }

    #[test]
    fn test_replay_conserves_volume() {
        let config = BenchmarkConfig {
            ticks: 5_000,
            ..Default::default()
        };
        let ticks = generate_ticks(&config);
        let clusters = replay(&config.symbol, &ticks);

        assert!(clusters.len() > 1);
        let replayed: f64 = clusters.iter().map(|c| c.volume_total).sum();
        let input: f64 = ticks.iter().map(Tick::effective_volume).sum();
        assert!((replayed - input).abs() < 1e-6 * input);
    }

    #[test]
    fn test_run_replay() {
        let dir = tempfile::tempdir().unwrap();
        let config = BenchmarkConfig {
            ticks: 2_000,
            format: OutputFormat::Ndjson,
            ..Default::default()
        };
        let result = run_replay(&config, &dir.path().join("out.ndjson")).unwrap();
        assert_eq!(result.ticks, 2_000);
        assert!(result.clusters > 0);
        assert!(result.output_size > 0);
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_secs(90)), "1.5m");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
    }
}
