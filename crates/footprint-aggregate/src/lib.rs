//! Delta-bounded footprint cluster aggregation for tick streams.
//!
//! This crate provides tick-to-cluster aggregation:
//!
//! - [`Cluster`] - Footprint candle closed by order-flow delta
//! - [`PriceLevel`] - Volume at one discretized price inside a cluster
//! - [`ClusterAggregator`] - Streaming aggregator with history replay

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/footprint/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod cluster;
mod level;

pub use aggregator::ClusterAggregator;
pub use cluster::Cluster;
pub use level::PriceLevel;
