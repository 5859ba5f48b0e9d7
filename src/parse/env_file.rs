//! `.env` file parser

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

use super::{strip_quotes, RawMap};
use crate::error::{Result, UnifiedEnvError};
use crate::logger::LogGate;
use crate::utils::encoding::read_with_encoding;

static KEY_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z0-9_.-]+)\s*=\s*(.*)?\s*$").expect("valid regex"));

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\n|\r").expect("valid regex"));

/// Options for reading an env file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOptions {
    /// Relative paths resolve against the current working directory.
    pub file_path: PathBuf,
    pub encoding: String,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self { file_path: PathBuf::from(".env"), encoding: "utf-8".to_string() }
    }
}

impl FileOptions {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self { file_path: file_path.into(), ..Self::default() }
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }
}

/// Read and parse the file described by `options`.
///
/// Fails with [`UnifiedEnvError::FileNotFound`] carrying the resolved absolute
/// path when nothing exists there.
pub fn parse_env_file(options: &FileOptions, gate: &LogGate) -> Result<RawMap> {
    let path = resolve_path(&options.file_path)?;
    if !path.exists() {
        return Err(UnifiedEnvError::FileNotFound { path });
    }

    let (content, had_errors) = read_with_encoding(&path, &options.encoding)?;
    if had_errors {
        gate.warn(format_args!(
            "replaced invalid {} sequences while reading {}",
            options.encoding,
            path.display()
        ));
    }
    Ok(parse_env_str(&content, gate))
}

/// Parse `.env` contents. Lines that are not `key = value` are skipped.
pub fn parse_env_str(content: &str, gate: &LogGate) -> RawMap {
    let mut results = RawMap::new();

    for (index, line) in LINE_BREAK.split(content).enumerate() {
        let Some(caps) = KEY_VALUE.captures(line) else {
            gate.debug(format_args!(
                "did not match key and value when parsing line {}: {}",
                index + 1,
                line
            ));
            continue;
        };

        let key = caps[1].to_string();
        let raw = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        let value = match strip_quotes(raw) {
            Some((inner, '"')) => inner.replace("\\n", "\n"),
            Some((inner, _)) => inner.to_string(),
            None => raw.trim().to_string(),
        };

        results.insert(key, value);
    }

    results
}

fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{LogLevel, MemoryLogger};
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "# comment line\n\
ENV=dev\n\
PORT = 3000\n\
\n\
LOG_LEVEL=debug\r\n\
DATABASE_URL=database://url\r\
APP_SECRET='topsecret '\n\
WITH_QUOTES=\"this is a phrase\"\n";

    fn gate() -> (LogGate, Arc<MemoryLogger>) {
        let memory = Arc::new(MemoryLogger::new());
        (LogGate::new(LogLevel::Debug, Box::new(memory.clone())), memory)
    }

    #[test]
    fn test_parse_sample() {
        let (gate, memory) = gate();
        let parsed = parse_env_str(SAMPLE, &gate);
        let expected: RawMap = [
            ("ENV", "dev"),
            ("PORT", "3000"),
            ("LOG_LEVEL", "debug"),
            ("DATABASE_URL", "database://url"),
            ("APP_SECRET", "topsecret "),
            ("WITH_QUOTES", "this is a phrase"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        similar_asserts::assert_eq!(parsed, expected);
        assert!(memory.contains(LogLevel::Debug, "parsing line 1: # comment line"));
    }

    #[test]
    fn test_unquoted_value_is_trimmed() {
        let (gate, _) = gate();
        let parsed = parse_env_str("APP_SECRET=topsecret   \n", &gate);
        assert_eq!(parsed["APP_SECRET"], "topsecret");
    }

    #[test]
    fn test_double_quotes_expand_newlines() {
        let (gate, _) = gate();
        let parsed = parse_env_str("MULTI=\"line one\\nline two\"\nSINGLE='keep\\nliteral'\n", &gate);
        assert_eq!(parsed["MULTI"], "line one\nline two");
        assert_eq!(parsed["SINGLE"], "keep\\nliteral");
    }

    #[test]
    fn test_unbalanced_quotes_are_kept() {
        let (gate, _) = gate();
        let parsed = parse_env_str("LEAD=\"open\nTRAIL=close'\nMIXED=\"mixed'\n", &gate);
        assert_eq!(parsed["LEAD"], "\"open");
        assert_eq!(parsed["TRAIL"], "close'");
        assert_eq!(parsed["MIXED"], "\"mixed'");
    }

    #[test]
    fn test_quotes_followed_by_whitespace_are_not_stripped() {
        let (gate, _) = gate();
        let parsed = parse_env_str("QUOTED=\"value\"   \n", &gate);
        assert_eq!(parsed["QUOTED"], "\"value\"");
    }

    #[test]
    fn test_empty_value_and_dotted_keys() {
        let (gate, _) = gate();
        let parsed = parse_env_str("EMPTY=\napp.name-x = hi\n", &gate);
        assert_eq!(parsed["EMPTY"], "");
        assert_eq!(parsed["app.name-x"], "hi");
    }

    #[test]
    fn test_parse_env_file_reads_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"FROM_FILE=yes\n").unwrap();
        file.flush().unwrap();

        let (gate, _) = gate();
        let parsed = parse_env_file(&FileOptions::new(file.path()), &gate).unwrap();
        assert_eq!(parsed["FROM_FILE"], "yes");
    }

    #[test]
    fn test_parse_env_file_warns_on_replaced_bytes() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[b'A', b'=', 0xff, b'\n']).unwrap();
        file.flush().unwrap();

        let (gate, memory) = gate();
        let parsed = parse_env_file(&FileOptions::new(file.path()), &gate).unwrap();
        assert_eq!(parsed["A"], "\u{fffd}");
        assert!(memory.contains(LogLevel::Warn, "replaced invalid utf-8 sequences"));
    }

    #[test]
    fn test_parse_env_file_missing() {
        let (gate, _) = gate();
        let err = parse_env_file(&FileOptions::new("./i/dont/exist.env"), &gate).unwrap_err();
        match err {
            UnifiedEnvError::FileNotFound { path } => {
                assert!(path.is_absolute());
                assert!(path.ends_with("i/dont/exist.env"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_default_file_options() {
        let options = FileOptions::default();
        assert_eq!(options.file_path, PathBuf::from(".env"));
        assert_eq!(options.encoding, "utf-8");
    }
}
