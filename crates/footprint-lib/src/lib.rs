//! Delta-bounded footprint cluster aggregation for trade tick streams.
//!
//! This is a facade crate that re-exports functionality from the footprint
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```
//! use footprint_lib::prelude::*;
//! use chrono::Utc;
//! # fn main() -> Result<()> {
//!
//! let config = SymbolRegistry::global().cluster_config_for("eurusd");
//! let mut aggregator = ClusterAggregator::new(config)?;
//!
//! let tick = Tick::new("EURUSD", 1.0850, 5.0, Side::Buy, Utc::now());
//! if let Some(cluster) = aggregator.process_tick(&tick) {
//!     println!("cluster {} closed with delta {}", cluster.id, cluster.delta);
//! }
//!
//! for cluster in aggregator.all_clusters() {
//!     println!("{} ticks, poc {}", cluster.tick_count, cluster.poc);
//! }
//! # Ok(())
//! # }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/footprint/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use footprint_types::*;

// Re-export symbol presets
pub use footprint_symbols::SymbolRegistry;

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use footprint_aggregate::{Cluster, ClusterAggregator, PriceLevel};

// Re-export readers and formatters
#[cfg(feature = "format")]
pub use footprint_format::{
    CsvFormatter, FormatError, Formatter, InputFormat, JsonFormatter, JsonStyle, LevelRow,
    OutputFormat, read_ticks,
};

#[cfg(feature = "parquet")]
pub use footprint_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use footprint_lib::prelude::*;
/// ```
pub mod prelude {
    pub use footprint_types::{
        Category, ClusterConfig, ClusterConfigUpdate, ConfigError, FootprintError, Result, Side,
        SymbolSpec, Tick,
    };

    pub use footprint_symbols::SymbolRegistry;

    #[cfg(feature = "aggregate")]
    pub use footprint_aggregate::{Cluster, ClusterAggregator, PriceLevel};

    #[cfg(feature = "format")]
    pub use footprint_format::{
        CsvFormatter, Formatter, InputFormat, JsonFormatter, OutputFormat, read_ticks,
    };

    #[cfg(feature = "parquet")]
    pub use footprint_format::ParquetFormatter;
}
