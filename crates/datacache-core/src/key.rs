//! Composite cache keys.

use std::fmt;
use std::path::Path;

/// Separates the archive path from the entry name inside a composite key.
const ENTRY_DELIMITER: char = '#';

/// A parsed cache key: an archive path plus an optional entry name.
///
/// Keys travel as a single string of the form `path/to/archive.zip` or
/// `path/to/archive.zip#entryname`. The entry name selects one record
/// stream inside the archive; when it is absent the first entry is used.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveKey {
    path: String,
    entry: Option<String>,
}

impl ArchiveKey {
    /// Create a key from an already-split path and entry name.
    pub fn new(path: impl Into<String>, entry: Option<String>) -> Self {
        Self {
            path: path.into(),
            entry,
        }
    }

    /// Parse a composite key, splitting on the last `#`.
    ///
    /// Without a delimiter the whole string is the archive path and the
    /// entry name is unset.
    pub fn parse(key: &str) -> Self {
        match key.rfind(ENTRY_DELIMITER) {
            Some(idx) => Self {
                path: key[..idx].to_string(),
                entry: Some(key[idx + 1..].to_string()),
            },
            None => Self {
                path: key.to_string(),
                entry: None,
            },
        }
    }

    /// The archive (or plain file) path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The entry name, if one was given.
    pub fn entry(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    /// Whether the path refers to a zip archive rather than a plain file.
    pub fn is_archive(&self) -> bool {
        Path::new(&self.path)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
    }
}

impl fmt::Display for ArchiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entry {
            Some(entry) => write!(f, "{}{}{}", self.path, ENTRY_DELIMITER, entry),
            None => write!(f, "{}", self.path),
        }
    }
}

impl From<&str> for ArchiveKey {
    fn from(key: &str) -> Self {
        Self::parse(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_entry() {
        let key = ArchiveKey::parse("equity/usa/minute/spy/20240102_trade.zip");
        assert_eq!(key.path(), "equity/usa/minute/spy/20240102_trade.zip");
        assert_eq!(key.entry(), None);
    }

    #[test]
    fn test_parse_with_entry() {
        let key = ArchiveKey::parse("20240102_trade.zip#20240102_spy_minute_trade.csv");
        assert_eq!(key.path(), "20240102_trade.zip");
        assert_eq!(key.entry(), Some("20240102_spy_minute_trade.csv"));
    }

    #[test]
    fn test_parse_splits_on_last_delimiter() {
        let key = ArchiveKey::parse("odd#name.zip#entry.csv");
        assert_eq!(key.path(), "odd#name.zip");
        assert_eq!(key.entry(), Some("entry.csv"));
    }

    #[test]
    fn test_is_archive() {
        assert!(ArchiveKey::parse("a/b/c.zip").is_archive());
        assert!(ArchiveKey::parse("a/b/C.ZIP#entry").is_archive());
        assert!(!ArchiveKey::parse("a/b/c.csv").is_archive());
        assert!(!ArchiveKey::parse("a/b/zipless").is_archive());
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["plain.csv", "archive.zip", "archive.zip#entry.csv"] {
            assert_eq!(ArchiveKey::parse(raw).to_string(), raw);
        }
    }
}
