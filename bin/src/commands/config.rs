//! Config command implementation.

use anyhow::{Context, Result};

use crate::ClusterArgs;
use crate::config::{AppConfig, resolve};

/// Print the effective cluster configuration as TOML.
pub(crate) fn show_config(args: &ClusterArgs) -> Result<()> {
    let file = AppConfig::load_optional(args.config.as_deref())?;
    let config = resolve(args, &file, None)?;

    let rendered = toml::to_string(&config).context("Failed to render configuration")?;
    println!("[cluster]");
    print!("{rendered}");

    Ok(())
}
