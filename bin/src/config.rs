//! Configuration file loading and layering.
//!
//! The effective cluster configuration is built from three layers, later
//! layers winning: the symbol preset (or the built-in default), the optional
//! TOML file, then command line flags.

use anyhow::{Context, Result};
use footprint_lib::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::ClusterArgs;

/// Contents of a `footprint.toml` file.
///
/// ```toml
/// [cluster]
/// price_level_size = 0.0005
/// delta_threshold = 250.0
/// tick_threshold = 500
///
/// [output]
/// format = "ndjson"
/// pretty = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AppConfig {
    /// Cluster overrides applied on top of the symbol preset.
    pub(crate) cluster: ClusterConfigUpdate,
    /// Output defaults.
    pub(crate) output: OutputConfig,
}

/// `[output]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct OutputConfig {
    /// Default output format name (csv, json, ndjson, parquet).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) format: Option<String>,
    /// Pretty-print JSON arrays.
    pub(crate) pretty: bool,
}

impl AppConfig {
    /// Parses a configuration from TOML text.
    pub(crate) fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid configuration file")
    }

    /// Loads a configuration file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub(crate) fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Returns the configured default output format.
    pub(crate) fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.output
            .format
            .as_deref()
            .map(|name| {
                name.parse::<OutputFormat>()
                    .with_context(|| format!("Invalid [output] format: {name}"))
            })
            .transpose()
    }
}

impl ClusterArgs {
    /// Returns the overrides given as flags.
    pub(crate) fn overrides(&self) -> ClusterConfigUpdate {
        ClusterConfigUpdate {
            price_level_size: self.level_size,
            delta_threshold: self.delta_threshold,
            tick_threshold: self.tick_threshold.map(Some),
        }
    }
}

/// Resolves the effective cluster configuration.
///
/// `fallback_symbol` is used when no `--symbol` flag was given, typically the
/// symbol carried by the input ticks. Unknown fallback symbols use the
/// built-in default; an unknown `--symbol` is an error.
pub(crate) fn resolve(
    args: &ClusterArgs,
    file: &AppConfig,
    fallback_symbol: Option<&str>,
) -> Result<ClusterConfig> {
    let registry = SymbolRegistry::global();

    let base = match (args.symbol.as_deref(), fallback_symbol) {
        (Some(id), _) => registry.require(id)?.cluster_config(),
        (None, Some(id)) => registry.cluster_config_for(id),
        (None, None) => ClusterConfig::default(),
    };

    let config = base.merged(&file.cluster.layer(args.overrides()));
    config.validate().context("Invalid cluster configuration")?;

    debug!(
        price_level_size = config.price_level_size,
        delta_threshold = config.delta_threshold,
        tick_threshold = ?config.tick_threshold,
        "resolved cluster config"
    );

    Ok(config)
}
