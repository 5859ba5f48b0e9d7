//! Parse command implementation

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use unified_env::logger::{LogGate, LogLevel, TracingLogger};
use unified_env::parse::{parse_argv, parse_env_file};
use unified_env::FileOptions;

#[derive(Args)]
pub struct ParseArgs {
    #[command(subcommand)]
    target: ParseTarget,
}

#[derive(Subcommand)]
enum ParseTarget {
    /// Parse the arguments given after `--`
    Argv {
        #[arg(last = true, value_name = "ARGS")]
        args: Vec<String>,
    },

    /// Parse a .env file
    File {
        #[arg(value_name = "PATH")]
        path: PathBuf,

        #[arg(long, value_name = "ENCODING", default_value = "utf-8")]
        encoding: String,
    },
}

pub fn run(args: ParseArgs) -> Result<()> {
    let gate = LogGate::new(LogLevel::Log, Box::new(TracingLogger));

    let parsed = match args.target {
        ParseTarget::Argv { args } => parse_argv(&args, &gate),
        ParseTarget::File { path, encoding } => {
            parse_env_file(&FileOptions::new(path).encoding(encoding), &gate)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}
