//! Replay command implementation.
//!
//! This module reads a tick file, aggregates it into footprint clusters and
//! writes the result to one of the supported output formats.

use crate::ClusterArgs;
use crate::config::{AppConfig, resolve};
use crate::display::{Format, Records, TickFormat, write_clusters};
use anyhow::{Context, Result};
use footprint_lib::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Aggregate a tick file into clusters and write them out.
#[allow(clippy::too_many_arguments)]
pub(crate) fn replay(
    input: &Path,
    input_format: Option<TickFormat>,
    output: Option<PathBuf>,
    format: Option<Format>,
    levels: bool,
    args: &ClusterArgs,
    quiet: bool,
) -> Result<()> {
    let file_config = AppConfig::load_optional(args.config.as_deref())?;

    // Flag beats config file, config file beats csv
    let format = match format {
        Some(format) => OutputFormat::from(format),
        None => file_config.output_format()?.unwrap_or_default(),
    };

    let input_format = input_format.map_or_else(|| InputFormat::from_path(input), Into::into);
    let ticks = load_ticks(input, input_format, quiet)?;

    let fallback_symbol = ticks
        .first()
        .map(|tick| tick.symbol.as_str())
        .filter(|symbol| !symbol.is_empty());
    let config = resolve(args, &file_config, fallback_symbol)?;

    if args.symbol.is_none()
        && let Some(symbol) = fallback_symbol
        && SymbolRegistry::global().get(symbol).is_none()
    {
        warn!(symbol, "no preset for tick symbol, using default cluster config");
    }

    let clusters = aggregate(&ticks, config, quiet)?;

    let records = if levels {
        Records::Levels
    } else {
        Records::Clusters
    };
    let output = output.unwrap_or_else(|| default_output(input, format, records));
    write_clusters(
        &clusters,
        &output,
        format,
        file_config.output.pretty,
        records,
    )
    .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(path = %output.display(), %format, clusters = clusters.len(), "output written");

    if !quiet {
        print_summary(&ticks, &clusters, &config);
        println!("Output written to: {}", output.display());
    }

    Ok(())
}

/// Read all ticks from `input`, showing a spinner unless `quiet`.
fn load_ticks(input: &Path, format: InputFormat, quiet: bool) -> Result<Vec<Tick>> {
    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template"),
        );
        pb.set_message(format!("Reading {}", input.display()));
        pb
    };

    let file =
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let ticks = read_ticks(BufReader::new(file), format)
        .with_context(|| format!("Failed to read ticks from {}", input.display()))?;

    spinner.finish_with_message(format!("Read {} ticks ({format})", ticks.len()));
    Ok(ticks)
}

/// Replay `ticks` through a fresh aggregator, showing a progress bar unless
/// `quiet`.
fn aggregate(ticks: &[Tick], config: ClusterConfig, quiet: bool) -> Result<Vec<Arc<Cluster>>> {
    let mut aggregator = ClusterAggregator::new(config)?;

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(ticks.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ticks ({percent}%) {msg}")
                .expect("Invalid progress template")
                .progress_chars("=>-"),
        );
        pb
    };

    let closed = aggregator.load_from_history(progress.wrap_iter(ticks.iter()));
    progress.finish_with_message(format!("{closed} clusters"));

    Ok(aggregator.finish())
}

/// Default output path: `<input stem>.clusters.<ext>` or `<input stem>.levels.<ext>`.
fn default_output(input: &Path, format: OutputFormat, records: Records) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("ticks");
    let kind = match records {
        Records::Clusters => "clusters",
        Records::Levels => "levels",
    };
    input.with_file_name(format!("{stem}.{kind}.{}", format.extension()))
}

fn print_summary(ticks: &[Tick], clusters: &[Arc<Cluster>], config: &ClusterConfig) {
    println!("\nReplay Summary:");
    println!("  Ticks:            {}", ticks.len());
    println!("  Clusters:         {}", clusters.len());
    println!("  Price Level Size: {}", config.price_level_size);
    println!("  Delta Threshold:  {}", config.delta_threshold);
    if let Some(tick_threshold) = config.tick_threshold {
        println!("  Tick Threshold:   {tick_threshold}");
    }

    let (Some(first), Some(last)) = (clusters.first(), clusters.last()) else {
        return;
    };

    let end = last.end_time.unwrap_or(last.start_time);
    println!(
        "  Span:             {} -> {}",
        first.start_time.format(TIMESTAMP_FORMAT),
        end.format(TIMESTAMP_FORMAT)
    );

    let volume: f64 = clusters.iter().map(|c| c.volume_total).sum();
    let delta: f64 = clusters.iter().map(|c| c.delta).sum();
    let body: f64 = clusters.iter().map(|c| c.body_volume).sum();
    let levels: usize = clusters.iter().map(|c| c.price_levels.len()).sum();
    let bullish = clusters.iter().filter(|c| c.is_bullish()).count();

    println!("  Volume:           {volume}");
    println!("  Net Delta:        {delta}");
    if volume > 0.0 {
        println!("  Body Volume:      {:.1}%", body / volume * 100.0);
    }
    println!(
        "  Avg Levels:       {:.1}",
        levels as f64 / clusters.len() as f64
    );
    println!(
        "  Bullish/Bearish:  {}/{}",
        bullish,
        clusters.iter().filter(|c| c.is_bearish()).count()
    );
}
