//! Core types for the footprint order-flow cluster engine.
//!
//! This crate provides the fundamental data structures used throughout footprint:
//!
//! - [`Tick`] - A single trade print with price, volume, aggressor side and timestamp
//! - [`Side`] - Aggressor side of a trade
//! - [`ClusterConfig`] - Price bucketing and closing rules for clusters
//! - [`ClusterConfigUpdate`] - Partial configuration merged into a [`ClusterConfig`]
//! - [`SymbolSpec`] - Per-symbol preset with default cluster settings

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/footprint/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod symbol;
mod tick;

pub use config::{ClusterConfig, ClusterConfigUpdate, ConfigError};
pub use error::{FootprintError, Result};
pub use symbol::{Category, CategoryParseError, SymbolSpec};
pub use tick::{Side, SideParseError, Tick};
