//! footprint CLI - Replay trade ticks into delta-bounded footprint clusters.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

mod commands;
mod config;
mod display;

use display::{Format, TickFormat};

#[derive(Parser)]
#[command(name = "footprint")]
#[command(about = "Replay trade ticks into delta-bounded footprint clusters", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a tick file into footprint clusters
    Replay {
        /// Tick file (JSON array or NDJSON)
        input: PathBuf,

        /// Input format. Defaults to the file extension (.ndjson/.jsonl or JSON)
        #[arg(long, value_enum)]
        input_format: Option<TickFormat>,

        /// Output file path. Defaults to <input stem>.clusters.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format. Defaults to the config file's [output] format, then csv
        #[arg(short, long, value_enum)]
        format: Option<Format>,

        /// Write one row per footprint level instead of one per cluster
        #[arg(long)]
        levels: bool,

        #[command(flatten)]
        cluster: ClusterArgs,
    },

    /// List available symbol presets
    List {
        /// Filter by category (forex, crypto, index, commodity)
        #[arg(short, long)]
        category: Option<String>,

        /// Search pattern
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show symbol preset details
    Info {
        /// Symbol identifier
        symbol: String,
    },

    /// Print the effective cluster configuration as TOML
    Config {
        #[command(flatten)]
        cluster: ClusterArgs,
    },
}

/// Flags that select and override the cluster configuration.
#[derive(Args, Debug, Default)]
pub(crate) struct ClusterArgs {
    /// Symbol preset (e.g., eurusd, xauusd). Defaults to the first tick's symbol
    #[arg(short, long)]
    pub(crate) symbol: Option<String>,

    /// TOML configuration file with [cluster] and [output] tables
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Price level size override
    #[arg(long)]
    pub(crate) level_size: Option<f64>,

    /// Delta threshold override
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) delta_threshold: Option<f64>,

    /// Tick count threshold override
    #[arg(long)]
    pub(crate) tick_threshold: Option<u32>,
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `-v` raises the level from `warn`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Replay {
            input,
            input_format,
            output,
            format,
            levels,
            cluster,
        } => commands::replay::replay(
            &input,
            input_format,
            output,
            format,
            levels,
            &cluster,
            cli.quiet,
        ),
        Commands::List { category, search } => {
            commands::list::list_symbols(category.as_deref(), search.as_deref())
        }
        Commands::Info { symbol } => commands::info::show_info(&symbol),
        Commands::Config { cluster } => commands::config::show_config(&cluster),
    }
}
