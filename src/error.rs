//! Error types

use std::path::PathBuf;
use thiserror::Error;

use crate::logger::LIB_NAME;

pub type Result<T> = std::result::Result<T, UnifiedEnvError>;

#[derive(Error, Debug)]
pub enum UnifiedEnvError {
    /// Construction options were rejected (bad log level).
    #[error("{}: errors - {0}", LIB_NAME)]
    InvalidOptions(String),

    #[error("{}: invalid schema - {0}", LIB_NAME)]
    InvalidSchema(String),

    #[error("Cannot find file: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Unsupported encoding '{label}'")]
    UnsupportedEncoding { label: String },

    /// Aggregate failure of `generate`. Per-key details are only in the logs
    /// and in `UnifiedEnv::errors`.
    #[error("{}: Errors occurred - see log messages for details", LIB_NAME)]
    Generation,

    #[error("Invalid TOML schema: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid YAML schema: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
