//! Leveled logging behind an injectable logger
//!
//! Every diagnostic the engine and the parsers produce goes through a
//! [`LogGate`], which drops calls below the configured minimum level and
//! prefixes the rest with the library name before handing them to the
//! caller-supplied [`Logger`]. The default logger forwards into `tracing`.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

pub const LIB_NAME: &str = "UnifiedEnv";

/// Ordered log levels: `Log < Debug < Info < Warn < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    Log,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] =
        [LogLevel::Log, LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Log => "log",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == lower)
            .ok_or_else(|| format!("logLevel: {}", s))
    }
}

/// A logger exposing one method per level.
pub trait Logger {
    fn log(&self, args: fmt::Arguments<'_>);
    fn debug(&self, args: fmt::Arguments<'_>);
    fn info(&self, args: fmt::Arguments<'_>);
    fn warn(&self, args: fmt::Arguments<'_>);
    fn error(&self, args: fmt::Arguments<'_>);
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, args: fmt::Arguments<'_>) {
        (**self).log(args)
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        (**self).debug(args)
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        (**self).info(args)
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        (**self).warn(args)
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        (**self).error(args)
    }
}

/// Default logger. `log` has no tracing counterpart and maps to `trace`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        tracing::trace!("{}", args);
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!("{}", args);
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!("{}", args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!("{}", args);
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        tracing::error!("{}", args);
    }
}

/// Logger that keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        let mut lines = self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        lines.push((level, args.to_string()));
    }

    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    /// Lines recorded at exactly `level`.
    pub fn at(&self, level: LogLevel) -> Vec<String> {
        self.lines().into_iter().filter(|(l, _)| *l == level).map(|(_, line)| line).collect()
    }

    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.at(level).iter().any(|line| line.contains(needle))
    }

    pub fn clear(&self) {
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        self.push(LogLevel::Log, args)
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.push(LogLevel::Debug, args)
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.push(LogLevel::Info, args)
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.push(LogLevel::Warn, args)
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.push(LogLevel::Error, args)
    }
}

/// Applies the minimum level and the library prefix.
pub struct LogGate {
    level: LogLevel,
    logger: Box<dyn Logger>,
}

impl LogGate {
    pub fn new(level: LogLevel, logger: Box<dyn Logger>) -> Self {
        Self { level, logger }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    pub fn emit(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        let logger = &self.logger;
        match level {
            LogLevel::Log => logger.log(format_args!("{}: {}", LIB_NAME, args)),
            LogLevel::Debug => logger.debug(format_args!("{}: {}", LIB_NAME, args)),
            LogLevel::Info => logger.info(format_args!("{}: {}", LIB_NAME, args)),
            LogLevel::Warn => logger.warn(format_args!("{}: {}", LIB_NAME, args)),
            LogLevel::Error => logger.error(format_args!("{}: {}", LIB_NAME, args)),
        }
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Debug, args)
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Info, args)
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Warn, args)
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Error, args)
    }
}

impl fmt::Debug for LogGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogGate").field("level", &self.level).finish_non_exhaustive()
    }
}
