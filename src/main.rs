//! Market data cache CLI application.

mod cli;
mod logging;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use logging::setup_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level {
        cli::LogLevel::Trace => "trace",
        cli::LogLevel::Debug => "debug",
        cli::LogLevel::Info => "info",
        cli::LogLevel::Warn => "warn",
        cli::LogLevel::Error => "error",
    };
    setup_logging(log_level, cli.json_logs);

    // Execute command
    match cli.command {
        Commands::Cat(args) => cli::commands::cat::run(args, &cli.config),
        Commands::Export(args) => cli::commands::export::run(args, &cli.config),
        Commands::Entries(args) => cli::commands::entries::run(args, &cli.config),
        Commands::InitConfig => cli::commands::init_config::run(&cli.config),
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config),
    }
}
