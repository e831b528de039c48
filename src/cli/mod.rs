//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "datacache")]
#[command(author, version, about = "Market data archive cache and reader toolbox")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print records from an archived data file
    Cat(CatArgs),
    /// Export records from an archived data file to CSV
    Export(ExportArgs),
    /// List the entries of a data archive
    Entries(EntriesArgs),
    /// Write a default configuration file
    InitConfig,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct CatArgs {
    /// Cache key, e.g. 20240102_trade.zip#20240102_spy_minute_trade.csv
    pub key: String,

    /// Symbol the file belongs to
    #[arg(short, long)]
    pub symbol: String,

    /// Trading date of the file (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: String,

    /// Resolution (tick, second, minute, hour, daily)
    #[arg(short, long, default_value = "minute")]
    pub resolution: String,

    /// Tick type (trade, quote)
    #[arg(short, long, default_value = "trade")]
    pub tick_type: String,

    /// Price scale divisor override (default 10000)
    #[arg(long)]
    pub price_scale: Option<f64>,

    /// Data folder override
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Print records as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Stop after this many records
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(clap::Args)]
pub struct ExportArgs {
    /// Cache key, e.g. 20240102_trade.zip#20240102_spy_minute_trade.csv
    pub key: String,

    /// Output CSV file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Symbol the file belongs to
    #[arg(short, long)]
    pub symbol: String,

    /// Trading date of the file (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: String,

    /// Resolution (tick, second, minute, hour, daily)
    #[arg(short, long, default_value = "minute")]
    pub resolution: String,

    /// Tick type (trade, quote)
    #[arg(short, long, default_value = "trade")]
    pub tick_type: String,

    /// Price scale divisor override (default 10000)
    #[arg(long)]
    pub price_scale: Option<f64>,

    /// Data folder override
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct EntriesArgs {
    /// Archive path, e.g. equity/usa/minute/spy/20240102_trade.zip
    pub key: String,

    /// Data folder override
    #[arg(long)]
    pub data: Option<PathBuf>,
}
