//! Tick input readers.

use footprint_types::Tick;
use std::io::{BufRead, Read};
use std::path::Path;
use tracing::debug;

use crate::FormatError;

/// Tick input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputFormat {
    /// A single JSON array of ticks.
    #[default]
    Json,
    /// One JSON tick object per line.
    Ndjson,
}

impl InputFormat {
    /// Guesses the format from a file extension, defaulting to JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("ndjson" | "jsonl") => Self::Ndjson,
            _ => Self::Json,
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Ndjson => write!(f, "ndjson"),
        }
    }
}

impl std::str::FromStr for InputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Reads ticks in file order.
///
/// Ticks are never re-sorted; the aggregator sees them exactly as stored.
///
/// # Errors
///
/// Returns an error if reading fails or a record is not a valid tick. NDJSON
/// errors carry the 1-based line number; blank lines are skipped.
pub fn read_ticks<R: BufRead>(reader: R, format: InputFormat) -> Result<Vec<Tick>, FormatError> {
    let ticks = match format {
        InputFormat::Json => read_json_array(reader)?,
        InputFormat::Ndjson => read_ndjson(reader)?,
    };
    debug!(count = ticks.len(), %format, "ticks read");
    Ok(ticks)
}

fn read_json_array<R: Read>(reader: R) -> Result<Vec<Tick>, FormatError> {
    serde_json::from_reader(reader).map_err(|e| FormatError::Parse {
        line: e.line(),
        message: e.to_string(),
    })
}

fn read_ndjson<R: BufRead>(reader: R) -> Result<Vec<Tick>, FormatError> {
    let mut ticks = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let tick = serde_json::from_str(&line).map_err(|e| FormatError::Parse {
            line: index + 1,
            message: e.to_string(),
        })?;
        ticks.push(tick);
    }
    Ok(ticks)
}
