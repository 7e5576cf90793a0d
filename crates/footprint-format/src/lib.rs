//! Tick readers and cluster writers for footprint.
//!
//! Input:
//!
//! - [`read_ticks`] - JSON array or NDJSON tick files
//!
//! Output formatters for ticks, cluster summaries and footprint rows:
//!
//! - [`CsvFormatter`] - CSV format
//! - [`JsonFormatter`] - JSON array or NDJSON format
//! - [`ParquetFormatter`] - Apache Parquet columnar format

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/footprint/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod reader;

#[cfg(feature = "parquet")]
mod parquet;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, LevelRow, OutputFormat};
pub use json::{JsonFormatter, JsonStyle};
pub use reader::{InputFormat, read_ticks};

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;
