//! unified-env: merge environment variables, command-line arguments and
//! `.env` files into one validated, typed configuration.
//!
//! Sources are ingested in the caller's order. The first source to supply a
//! key wins unless the key declares a tie-breaker source. `generate` applies
//! defaults, checks required and acceptable values and reports every problem
//! at once.

pub mod coerce;
pub mod domain;
pub mod engine;
pub mod error;
pub mod loader;
pub mod logger;
pub mod parse;
pub mod resolve;
pub mod source;
pub mod utils;
pub mod validate;

pub use domain::{EnvOption, EnvValue, ExpectedVariable, Schema, Source, ValueType};
pub use engine::{EnvOptions, GeneratedConfig, UnifiedEnv};
pub use error::{Result, UnifiedEnvError};
pub use loader::load_schema;
pub use logger::{LogLevel, Logger, MemoryLogger, TracingLogger};
pub use parse::FileOptions;
pub use source::{EnvSource, StdEnv};
