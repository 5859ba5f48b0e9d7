//! Schema file loading
//!
//! A schema document maps each variable name to either `true` (required plain
//! string) or an option table:
//!
//! ```toml
//! ENV_VAR = true
//! APP_PORT = { required = true, type = "number", acceptable_values = [2000, 3000, 4000] }
//! TIE_VAR = { required = true, tie_breaker = "file" }
//! ```
//!
//! The variables may also sit under a `[unified-env]` table. Declaration order
//! is preserved.

use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::domain::{EnvOption, ExpectedVariable, Schema};
use crate::error::{Result, UnifiedEnvError};

const SECTION: &str = "unified-env";

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Marker(bool),
    Options(EnvOption),
}

/// Load a schema from a `.toml`, `.yaml` or `.yml` file.
pub fn load_schema(path: &Path) -> Result<Schema> {
    if !path.exists() {
        return Err(UnifiedEnvError::FileNotFound { path: path.to_path_buf() });
    }
    let content = fs::read_to_string(path)?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "toml" => parse_toml_schema(&content),
        "yaml" | "yml" => parse_yaml_schema(&content),
        other => Err(UnifiedEnvError::InvalidSchema(format!(
            "unsupported schema extension '.{}' for file {}",
            other,
            path.display()
        ))),
    }
}

pub fn parse_toml_schema(content: &str) -> Result<Schema> {
    let raw: toml::Value = toml::from_str(content)?;
    let section = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };
    let entries: IndexMap<String, RawEntry> = section.try_into()?;
    into_schema(entries)
}

pub fn parse_yaml_schema(content: &str) -> Result<Schema> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)?;
    let section = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };
    let entries: IndexMap<String, RawEntry> = serde_yaml::from_value(section)?;
    into_schema(entries)
}

fn into_schema(entries: IndexMap<String, RawEntry>) -> Result<Schema> {
    entries
        .into_iter()
        .map(|(key, entry)| match entry {
            RawEntry::Marker(true) => Ok((key, ExpectedVariable::Required)),
            RawEntry::Marker(false) => Err(UnifiedEnvError::InvalidSchema(format!(
                "\"{}\" must be `true` or an option table",
                key
            ))),
            RawEntry::Options(opt) => Ok((key, ExpectedVariable::Options(opt))),
        })
        .collect()
}
