//! JSON output format.

use footprint_aggregate::Cluster;
use footprint_types::Tick;
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter, LevelRow};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
///
/// Clusters are written with their footprint levels embedded.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    fn write_records<W, T, I>(&self, records: I, mut writer: W) -> Result<(), FormatError>
    where
        W: Write,
        T: Serialize,
        I: IntoIterator<Item = T>,
    {
        match self.style {
            JsonStyle::Array => {
                let records: Vec<T> = records.into_iter().collect();
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, &records)?;
                } else {
                    serde_json::to_writer(&mut writer, &records)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for record in records {
                    serde_json::to_writer(&mut writer, &record)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_ticks<W: Write + Send>(&self, ticks: &[Tick], writer: W) -> Result<(), FormatError> {
        self.write_records(ticks, writer)
    }

    fn write_clusters<W: Write + Send>(
        &self,
        clusters: &[Arc<Cluster>],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_records(clusters.iter().map(AsRef::<Cluster>::as_ref), writer)
    }

    fn write_levels<W: Write + Send>(
        &self,
        clusters: &[Arc<Cluster>],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_records(LevelRow::from_clusters(clusters), writer)
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::fixtures;
    use std::io::Cursor;

    #[test]
    fn test_json_array_ticks() {
        let formatter = JsonFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_ticks(&fixtures::ticks(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with('['));
        assert!(result.contains("\"price\":1.1001"));
        assert!(result.contains("\"timestamp\":1705321845000"));
    }

    #[test]
    fn test_json_clusters_roundtrip() {
        let formatter = JsonFormatter::new();
        let clusters = fixtures::clusters();
        let mut output = Cursor::new(Vec::new());

        formatter.write_clusters(&clusters, &mut output).unwrap();

        let parsed: Vec<Cluster> = serde_json::from_slice(&output.into_inner()).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], *clusters[0]);
        assert_eq!(parsed[0].price_levels.len(), 3);
    }

    #[test]
    fn test_ndjson_clusters() {
        let formatter = JsonFormatter::ndjson();
        let clusters = fixtures::clusters();
        let mut output = Cursor::new(Vec::new());

        formatter.write_clusters(&clusters, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("{\"id\":1,"));
        assert!(lines[1].contains("\"end_time\":null"));
    }

    #[test]
    fn test_ndjson_levels_are_flat() {
        let formatter = JsonFormatter::ndjson();
        let clusters = fixtures::clusters();
        let mut output = Cursor::new(Vec::new());

        formatter.write_levels(&clusters, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let first: serde_json::Value = serde_json::from_str(result.lines().next().unwrap()).unwrap();
        assert_eq!(first["cluster_id"], 1);
        assert!(first.get("price").is_some());
        assert!(first.get("volume_total").is_some());
        assert_eq!(result.lines().count(), 4);
    }

    #[test]
    fn test_pretty_json() {
        let formatter = JsonFormatter::new().with_pretty(true);
        let mut output = Cursor::new(Vec::new());

        formatter.write_ticks(&fixtures::ticks(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains('\n'));
        assert!(result.contains("  "));
    }

    #[test]
    fn test_extension() {
        assert_eq!(JsonFormatter::new().extension(), "json");
        assert_eq!(JsonFormatter::ndjson().extension(), "ndjson");
    }
}
