//! File reading with an explicit encoding label.
//!
//! Labels follow the WHATWG encoding standard as implemented by `encoding_rs`
//! (`utf-8`, `utf8`, `latin1`, `utf-16le`, ...). A byte order mark in the file
//! takes precedence over the label.

use encoding_rs::Encoding;
use std::path::Path;

use crate::error::{Result, UnifiedEnvError};

/// Read the whole file at `path`, decoding it as `label`.
///
/// Invalid sequences are replaced rather than rejected; the returned flag is
/// set when that happened.
pub fn read_with_encoding(path: &Path, label: &str) -> Result<(String, bool)> {
    let encoding = lookup(label)?;
    let bytes = std::fs::read(path)?;
    let (decoded, _, had_errors) = encoding.decode(&bytes);
    Ok((decoded.into_owned(), had_errors))
}

fn lookup(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| UnifiedEnvError::UnsupportedEncoding { label: label.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_utf8() {
        let file = write("KEY=value 🚀".as_bytes());
        assert_eq!(read_with_encoding(file.path(), "utf-8").unwrap().0, "KEY=value 🚀");
    }

    #[test]
    fn test_read_utf8_bom_is_stripped() {
        let file = write(&[0xef, 0xbb, 0xbf, b'A', b'=', b'1']);
        assert_eq!(read_with_encoding(file.path(), "utf-8").unwrap().0, "A=1");
    }

    #[test]
    fn test_read_latin1() {
        let file = write(&[b'N', b'=', 0xe9]);
        assert_eq!(read_with_encoding(file.path(), "latin1").unwrap().0, "N=é");
    }

    #[test]
    fn test_invalid_bytes_are_replaced_and_flagged() {
        let file = write(&[b'A', b'=', 0xff]);
        let (text, had_errors) = read_with_encoding(file.path(), "utf-8").unwrap();
        assert_eq!(text, "A=\u{fffd}");
        assert!(had_errors);

        let clean = write(b"A=1");
        assert!(!read_with_encoding(clean.path(), "utf-8").unwrap().1);
    }

    #[test]
    fn test_label_is_case_insensitive() {
        let file = write(b"A=1");
        assert_eq!(read_with_encoding(file.path(), "UTF-8").unwrap().0, "A=1");
    }

    #[test]
    fn test_unknown_label() {
        let file = write(b"A=1");
        let err = read_with_encoding(file.path(), "does-not-matter").unwrap_err();
        assert!(matches!(err, UnifiedEnvError::UnsupportedEncoding { .. }));
    }
}
