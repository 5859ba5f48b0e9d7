//! Command-line interface for unified-env
//!
//! `generate` merges sources against a schema file and prints the result;
//! `parse` shows what a single source parser produces.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use unified_env::LogLevel;

mod generate;
mod parse;
mod utils;

/// Merge env variables, command-line arguments and .env files into one validated configuration
#[derive(Parser)]
#[command(name = "unified-env")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a configuration from a schema and print it as JSON
    Generate(generate::GenerateArgs),

    /// Print the flat key/value map a single source parser produces
    Parse(parse::ParseArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence.
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        match &cli.command {
            Commands::Generate(args) => {
                args.log_level.parse::<LogLevel>().map(tracing_level).unwrap_or(Level::WARN)
            }
            Commands::Parse(_) => Level::WARN,
        }
    };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Generate(args) => generate::run(args, cli.verbose),
        Commands::Parse(args) => parse::run(args),
    }
}

/// `log` has no tracing counterpart; the default logger sends it to TRACE.
fn tracing_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Log => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}
