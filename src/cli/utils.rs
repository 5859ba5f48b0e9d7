//! Shared CLI utilities.

use anyhow::Result;
use unified_env::Source;

/// Split a comma-separated string, trimming whitespace and discarding empty segments.
pub fn parse_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect()
}

/// Parse an ingestion order such as `env,argv,file`. Repeats are allowed.
pub fn parse_order(value: &str) -> Result<Vec<Source>> {
    parse_csv(value)
        .iter()
        .map(|part| match part.to_ascii_lowercase().as_str() {
            "env" => Ok(Source::Env),
            "argv" => Ok(Source::Argv),
            "file" => Ok(Source::File),
            other => anyhow::bail!("Invalid source '{}' in --order (expected env, argv or file)", other),
        })
        .collect()
}
