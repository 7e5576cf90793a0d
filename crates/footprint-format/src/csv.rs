//! CSV output format.

use chrono::{DateTime, Utc};
use footprint_aggregate::Cluster;
use footprint_types::Tick;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter, LevelRow};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

fn timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for CsvFormatter {
    fn write_ticks<W: Write + Send>(
        &self,
        ticks: &[Tick],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "timestamp{d}symbol{d}price{d}volume{d}side")?;
        }

        for tick in ticks {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}",
                timestamp(tick.timestamp),
                tick.symbol,
                tick.price,
                tick.volume,
                tick.side
            )?;
        }

        Ok(())
    }

    fn write_clusters<W: Write + Send>(
        &self,
        clusters: &[Arc<Cluster>],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "id{d}symbol{d}start_time{d}end_time{d}open{d}high{d}low{d}close{d}\
                 volume_buy{d}volume_sell{d}volume_total{d}delta{d}body_volume{d}\
                 wick_volume{d}body_volume_ratio{d}poc{d}tick_count{d}level_count{d}is_closed"
            )?;
        }

        for c in clusters {
            let end_time = c.end_time.map(timestamp).unwrap_or_default();
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                c.id,
                c.symbol,
                timestamp(c.start_time),
                end_time,
                c.open,
                c.high,
                c.low,
                c.close,
                c.volume_buy,
                c.volume_sell,
                c.volume_total,
                c.delta,
                c.body_volume,
                c.wick_volume,
                c.body_volume_ratio,
                c.poc,
                c.tick_count,
                c.price_levels.len(),
                c.is_closed
            )?;
        }

        Ok(())
    }

    fn write_levels<W: Write + Send>(
        &self,
        clusters: &[Arc<Cluster>],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "cluster_id{d}price{d}volume_buy{d}volume_sell{d}volume_total{d}delta{d}tick_count"
            )?;
        }

        for row in LevelRow::from_clusters(clusters) {
            let level = row.level;
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                row.cluster_id,
                level.price,
                level.volume_buy,
                level.volume_sell,
                level.volume_total,
                level.delta,
                level.tick_count
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
