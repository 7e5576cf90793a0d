//! Output format abstraction.

use footprint_aggregate::{Cluster, PriceLevel};
use footprint_types::Tick;
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use thiserror::Error;

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
    /// Apache Parquet format.
    Parquet,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Json, Self::Ndjson, Self::Parquet]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            "parquet" | "pq" => Ok(Self::Parquet),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur while reading or writing data.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown input or output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed input record.
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending record.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// Arrow/Parquet error.
    #[error("Parquet error: {0}")]
    Parquet(String),
}

/// One footprint level flattened with the id of its cluster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelRow<'a> {
    /// Id of the owning cluster.
    pub cluster_id: u64,
    /// The footprint level.
    #[serde(flatten)]
    pub level: &'a PriceLevel,
}

impl<'a> LevelRow<'a> {
    /// Flattens clusters into footprint rows, highest price first per cluster.
    pub fn from_clusters(clusters: &'a [Arc<Cluster>]) -> impl Iterator<Item = Self> + 'a {
        clusters.iter().flat_map(|cluster| {
            cluster.price_levels.iter().map(move |level| Self {
                cluster_id: cluster.id,
                level,
            })
        })
    }
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes tick data to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_ticks<W: Write + Send>(&self, ticks: &[Tick], writer: W) -> Result<(), FormatError>;

    /// Writes one summary record per cluster.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_clusters<W: Write + Send>(
        &self,
        clusters: &[Arc<Cluster>],
        writer: W,
    ) -> Result<(), FormatError>;

    /// Writes one record per cluster and footprint level.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_levels<W: Write + Send>(
        &self,
        clusters: &[Arc<Cluster>],
        writer: W,
    ) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeDelta, TimeZone, Utc};
    use footprint_aggregate::{Cluster, ClusterAggregator};
    use footprint_types::{ClusterConfig, Side, Tick};
    use std::sync::Arc;

    pub(crate) fn ticks() -> Vec<Tick> {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 45).unwrap();
        [
            (1.1000, 6.0, Side::Buy),
            (1.1001, 3.0, Side::Buy),
            (1.1002, 5.0, Side::Sell),
            (1.1002, 6.0, Side::Buy),
            (1.0999, 2.0, Side::Sell),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (price, volume, side))| {
            let timestamp = start + TimeDelta::milliseconds(i as i64 * 250);
            Tick::new("EURUSD", price, volume, side, timestamp)
        })
        .collect()
    }

    /// Two clusters: four ticks closed by delta, one flushed single-tick cluster.
    pub(crate) fn clusters() -> Vec<Arc<Cluster>> {
        let mut agg = ClusterAggregator::new(ClusterConfig::new(0.0001, 10.0)).unwrap();
        agg.load_from_history(&ticks());
        agg.finish()
    }
}
