//! Generate command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use unified_env::{load_schema, EnvOptions, FileOptions, Source, UnifiedEnv};

use super::utils::parse_order;

#[derive(Args)]
pub struct GenerateArgs {
    /// Schema file (.toml, .yaml or .yml)
    #[arg(short, long, value_name = "PATH")]
    pub schema: PathBuf,

    /// Env file to ingest at the `file` step (repeatable, ingested in order)
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Encoding of the env files
    #[arg(long, value_name = "ENCODING", default_value = "utf-8")]
    pub encoding: String,

    /// Order in which sources are ingested (comma-separated)
    #[arg(long, value_name = "SOURCES", default_value = "env,argv,file")]
    pub order: String,

    /// Minimum level of the engine's own log messages
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Arguments handed to the argv source
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

pub fn run(args: GenerateArgs, verbose: bool) -> Result<()> {
    let order = parse_order(&args.order)?;
    let schema = load_schema(&args.schema)
        .with_context(|| format!("Failed loading schema: {}", args.schema.display()))?;

    let log_level = if verbose { "debug" } else { args.log_level.as_str() };
    let mut env = UnifiedEnv::new(schema, EnvOptions::new().log_level(log_level))?;

    for source in order {
        match source {
            Source::Env => {
                env.env();
            }
            Source::Argv => {
                env.argv_from(&args.args);
            }
            Source::File => {
                for path in &args.files {
                    env.file(FileOptions::new(path).encoding(args.encoding.as_str()))?;
                }
            }
            Source::DefaultValue => {}
        }
    }

    let config = env.generate()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
