//! Display utilities and output formatting for the footprint CLI.

use anyhow::{Result, bail};
use clap::ValueEnum;
use footprint_lib::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

/// Output format for cluster data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
            Format::Parquet => Self::Parquet,
        }
    }
}

/// Input format for tick files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum TickFormat {
    Json,
    Ndjson,
}

impl From<TickFormat> for InputFormat {
    fn from(format: TickFormat) -> Self {
        match format {
            TickFormat::Json => Self::Json,
            TickFormat::Ndjson => Self::Ndjson,
        }
    }
}

/// What to write for each cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Records {
    /// One summary row per cluster.
    Clusters,
    /// One row per cluster and footprint level.
    Levels,
}

fn write_with<F: Formatter>(
    formatter: &F,
    clusters: &[Arc<Cluster>],
    records: Records,
    writer: BufWriter<File>,
) -> Result<()> {
    match records {
        Records::Clusters => formatter.write_clusters(clusters, writer)?,
        Records::Levels => formatter.write_levels(clusters, writer)?,
    }
    Ok(())
}

/// Write clusters to a file in the specified format.
pub(crate) fn write_clusters(
    clusters: &[Arc<Cluster>],
    output: &Path,
    format: OutputFormat,
    pretty: bool,
    records: Records,
) -> Result<()> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);

    match format {
        OutputFormat::Csv => write_with(&CsvFormatter::new(), clusters, records, writer),
        OutputFormat::Json => write_with(
            &JsonFormatter::new().with_pretty(pretty),
            clusters,
            records,
            writer,
        ),
        OutputFormat::Ndjson => write_with(&JsonFormatter::ndjson(), clusters, records, writer),
        OutputFormat::Parquet => write_parquet(clusters, records, writer),
    }
}

#[cfg(feature = "parquet")]
fn write_parquet(
    clusters: &[Arc<Cluster>],
    records: Records,
    writer: BufWriter<File>,
) -> Result<()> {
    write_with(&ParquetFormatter::new(), clusters, records, writer)
}

#[cfg(not(feature = "parquet"))]
fn write_parquet(
    _clusters: &[Arc<Cluster>],
    _records: Records,
    _writer: BufWriter<File>,
) -> Result<()> {
    bail!("Parquet support not compiled in")
}

/// Parse a category string into a Category enum.
pub(crate) fn parse_category(s: &str) -> Result<Category> {
    match s.parse::<Category>() {
        Ok(category) => Ok(category),
        Err(_) => bail!(
            "Unknown category: {}. Valid options: {}",
            s,
            Category::all()
                .iter()
                .map(Category::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("forex").unwrap(), Category::Forex);
        assert_eq!(parse_category("Crypto").unwrap(), Category::Crypto);

        let err = parse_category("bonds").unwrap_err().to_string();
        assert!(err.contains("forex, crypto, index, commodity"));
    }

    #[test]
    fn test_format_conversions() {
        assert_eq!(OutputFormat::from(Format::Ndjson), OutputFormat::Ndjson);
        assert_eq!(OutputFormat::from(Format::Parquet).extension(), "parquet");
        assert_eq!(InputFormat::from(TickFormat::Ndjson), InputFormat::Ndjson);
    }
}
