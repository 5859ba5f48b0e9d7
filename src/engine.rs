//! The configuration engine
//!
//! A [`UnifiedEnv`] is built from a [`Schema`], fed from any number of sources
//! in the caller's order, and finally validated by [`UnifiedEnv::generate`].
//!
//! ```no_run
//! use unified_env::{EnvOption, FileOptions, Schema, Source, UnifiedEnv, ValueType};
//!
//! let schema = Schema::new()
//!     .required("DATABASE_URL")
//!     .option("PORT", EnvOption::new().value_type(ValueType::Number).default_value(3000))
//!     .option("SECRET", EnvOption::new().required(true).tie_breaker(Source::File));
//!
//! let config = UnifiedEnv::with_schema(schema)?
//!     .env()
//!     .argv()
//!     .file(FileOptions::default())?
//!     .generate()?;
//!
//! let port = config.get_number("PORT");
//! # let _ = port;
//! # Ok::<(), unified_env::UnifiedEnvError>(())
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::coerce::coerce;
use crate::domain::{EnvValue, ExpectedVariable, Schema, Source, ValueType};
use crate::error::{Result, UnifiedEnvError};
use crate::logger::{LogGate, LogLevel, Logger, TracingLogger, LIB_NAME};
use crate::parse::{parse_argv, parse_env_file, FileOptions};
use crate::resolve::tie_breaker_passes;
use crate::source::{EnvSource, StdEnv};
use crate::validate::{
    acceptable_value_error, final_types_match, validate_config_options,
    validate_expected_variables,
};

const MISSING_REQUIRED: &str = "Missing required variable.";
const TYPE_MISMATCH: &str = "Value type does not match expected variable return type";

/// Construction options.
pub struct EnvOptions {
    /// One of `log|debug|info|warn|error`, case-insensitive.
    pub log_level: String,
    pub logger: Box<dyn Logger>,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self { log_level: LogLevel::Warn.to_string(), logger: Box::new(TracingLogger) }
    }
}

impl EnvOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Box::new(logger);
        self
    }
}

impl fmt::Debug for EnvOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvOptions").field("log_level", &self.log_level).finish_non_exhaustive()
    }
}

/// Read-only result of a successful generation, in schema declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GeneratedConfig {
    values: IndexMap<String, EnvValue>,
}

impl GeneratedConfig {
    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(EnvValue::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(EnvValue::as_bool)
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(EnvValue::as_number)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EnvValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Merges env, argv and file sources into one validated configuration.
pub struct UnifiedEnv {
    expected: Schema,
    config: IndexMap<String, EnvValue>,
    errors: IndexMap<String, Vec<String>>,
    gate: LogGate,
    has_generated: bool,
}

impl UnifiedEnv {
    /// Validate the schema and options and build an engine.
    pub fn new(expected: Schema, options: EnvOptions) -> Result<Self> {
        validate_expected_variables(&expected)?;

        let EnvOptions { log_level, logger } = options;
        let level = validate_config_options(&log_level, logger.as_ref())?;
        let gate = LogGate::new(level, logger);

        gate.debug(format_args!("constructed with config options {{ logLevel: \"{}\" }}", level));
        gate.debug(format_args!("expecting variables {:?}", expected));

        Ok(Self {
            expected,
            config: IndexMap::new(),
            errors: IndexMap::new(),
            gate,
            has_generated: false,
        })
    }

    /// Build an engine with default options.
    pub fn with_schema(expected: Schema) -> Result<Self> {
        Self::new(expected, EnvOptions::default())
    }

    /// Ingest the process environment.
    pub fn env(&mut self) -> &mut Self {
        self.env_from(&StdEnv)
    }

    pub fn env_from<E: EnvSource + ?Sized>(&mut self, source: &E) -> &mut Self {
        self.gate.debug(format_args!("start: parsing process.env variables"));
        self.loop_through_results(Source::Env, |key| source.get(key));
        self.gate.debug(format_args!("end: parsing process.env variables"));
        self
    }

    /// Ingest the process arguments, skipping the program name. Arguments
    /// that are not valid UTF-8 are converted lossily.
    pub fn argv(&mut self) -> &mut Self {
        let args: Vec<String> =
            std::env::args_os().skip(1).map(|arg| arg.to_string_lossy().into_owned()).collect();
        self.argv_from(args)
    }

    pub fn argv_from<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.gate.debug(format_args!("start: parsing process.argv variables"));
        let parsed = parse_argv(args, &self.gate);
        self.loop_through_results(Source::Argv, |key| parsed.get(key).cloned());
        self.gate.debug(format_args!("end: parsing process.argv variables"));
        self
    }

    /// Ingest an env file. Fails immediately when the file does not exist.
    pub fn file(&mut self, options: FileOptions) -> Result<&mut Self> {
        self.gate.debug(format_args!("start: parsing env-file variables"));
        let parsed = parse_env_file(&options, &self.gate)?;
        self.loop_through_results(Source::File, |key| parsed.get(key).cloned());
        self.gate.debug(format_args!("end: parsing env-file variables"));
        Ok(self)
    }

    /// Apply defaults, check required and acceptable values, and return the
    /// configuration. Any accumulated error fails the whole call.
    pub fn generate(&mut self) -> Result<GeneratedConfig> {
        self.gate.info(format_args!("generating config"));

        if self.has_generated {
            self.gate.warn(format_args!(
                "configuration already generated. \
                 Generating the configuration again can cause difficult to track bugs \
                 throughout the application.\
                 \n\tTry rewriting your code to only generate the configuration once \
                 as close to app start up as possible."
            ));
        }

        let schema = self.expected.clone();
        for (key, expected) in schema.iter() {
            if !self.config.contains_key(key) {
                match expected.options().and_then(|opt| opt.default_value.clone()) {
                    Some(default) => self.add_value_to_config(key, default, Source::DefaultValue),
                    None if expected.is_required() => {
                        self.add_error_message(key, MISSING_REQUIRED.to_string())
                    }
                    None => self.gate.info(format_args!(
                        "Missing \"{}\" variable. Variable was not required",
                        key
                    )),
                }
            }

            let Some(value) = self.config.get(key).cloned() else {
                continue;
            };

            if let Some(message) = acceptable_value_error(&value, expected) {
                self.add_error_message(key, message);
            }

            if !final_types_match(&value, expected) {
                self.add_error_message(key, TYPE_MISMATCH.to_string());
            }
        }

        if !self.errors.is_empty() {
            let details = serde_json::to_string_pretty(&self.errors).unwrap_or_default();
            self.gate.error(format_args!("Errors {}", details));
            return Err(UnifiedEnvError::Generation);
        }

        self.has_generated = true;
        self.gate.info(format_args!("generated config"));
        let values = self
            .expected
            .keys()
            .filter_map(|key| self.config.get(key).map(|value| (key.clone(), value.clone())))
            .collect();
        let generated = GeneratedConfig { values };
        if self.gate.enabled(LogLevel::Debug) {
            let json = serde_json::to_string(&generated).unwrap_or_default();
            self.gate.debug(format_args!("returned config {}", json));
        }
        Ok(generated)
    }

    /// Per-key error messages accumulated so far.
    pub fn errors(&self) -> &IndexMap<String, Vec<String>> {
        &self.errors
    }

    pub fn has_generated(&self) -> bool {
        self.has_generated
    }

    pub fn expected(&self) -> &Schema {
        &self.expected
    }

    pub fn log_level(&self) -> LogLevel {
        self.gate.level()
    }

    /// Hand every expected key found (non-empty) in `lookup` to the write path.
    fn loop_through_results<F>(&mut self, from: Source, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let found: Vec<(String, String)> = self
            .expected
            .keys()
            .filter_map(|key| lookup(key).filter(|v| !v.is_empty()).map(|v| (key.clone(), v)))
            .collect();

        for (key, value) in found {
            self.gate.debug(format_args!("found key \"{}\" in {}", key, from));
            self.add_value_to_config(&key, EnvValue::String(value), from);
        }
    }

    /// The single write path into the result map.
    fn add_value_to_config(&mut self, key: &str, value: EnvValue, from: Source) {
        let Some(expected) = self.expected.get(key) else {
            self.gate.warn(format_args!(
                "key \"{}\" was not found in the expected variables. \
                 Make sure it is added in the {} constructor. \
                 Not adding value to returned {} config.",
                key, LIB_NAME, LIB_NAME
            ));
            return;
        };
        let value_type = expected.value_type();

        if let Some(existing) = self.config.get(key) {
            if !tie_breaker_passes(key, expected, from, &self.gate) {
                self.gate.info(format_args!(
                    "key \"{}\" already has value: \"{}\" - not setting to the new value: \"{}\" from \"{}\"",
                    key, existing, value, from
                ));
                return;
            }
            self.gate.info(format_args!(
                "key \"{}\" already has value: \"{}\" - tieBreaker passed for incoming value. \
                 Overwriting with the new value: \"{}\" from \"{}\"",
                key, existing, value, from
            ));
        }

        let value = match value {
            EnvValue::String(raw) if value_type != ValueType::String => {
                match coerce(key, &raw, value_type) {
                    Ok(parsed) => {
                        // a good value supersedes a bad one from an earlier source
                        self.errors.shift_remove(key);
                        parsed
                    }
                    Err(err) => {
                        self.gate.error(format_args!("{}", err));
                        self.gate.warn(format_args!(
                            "key \"{}\" had a parsing error. Not setting in config.",
                            key
                        ));
                        self.add_error_message(key, err.to_string());
                        return;
                    }
                }
            }
            typed if value_type != ValueType::String && typed.value_type() == value_type => {
                self.errors.shift_remove(key);
                typed
            }
            other => other,
        };

        self.set_config_value(key, value);
    }

    fn set_config_value(&mut self, key: &str, value: EnvValue) {
        let pair = serde_json::json!({ key: &value });
        self.gate.info(format_args!("setting config variable: {}", pair));
        self.config.insert(key.to_string(), value);
    }

    fn add_error_message(&mut self, key: &str, message: String) {
        self.errors.entry(key.to_string()).or_default().push(message);
    }
}

impl fmt::Debug for UnifiedEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnifiedEnv")
            .field("expected", &self.expected)
            .field("config", &self.config)
            .field("errors", &self.errors)
            .field("log_level", &self.gate.level())
            .field("has_generated", &self.has_generated)
            .finish()
    }
}
