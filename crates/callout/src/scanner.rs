//! Discovery and reading of source documents.

use std::{
    cmp::Ordering,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, trace};

use callout_core::identifier::CalloutId;

use crate::{config::ScanConfig, error::CalloutError};

/// One source document, read once and dropped after extraction.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    path: PathBuf,
    stem: String,
    id: CalloutId,
    text: String,
}

impl SourceDocument {
    /// Creates a document from its path and already decoded text.
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let id = CalloutId::from_file_stem(&stem);
        Self {
            path,
            stem,
            id,
            text: text.into(),
        }
    }

    /// Reads a document, decoding invalid UTF-8 lossily.
    ///
    /// # Errors
    ///
    /// Returns [`CalloutError::Scan`] if the file cannot be read.
    pub fn read(path: &Path) -> Result<Self, CalloutError> {
        let bytes = fs::read(path).map_err(|source| CalloutError::Scan {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path, String::from_utf8_lossy(&bytes)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name as shown in progress messages.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn id(&self) -> &CalloutId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Display name of the entry generated from this document.
    pub fn display_name(&self) -> String {
        format!("Imported {}", self.stem)
    }

    /// Display name of the placeholder substituted for this document.
    pub fn placeholder_name(&self) -> String {
        format!("Imported {} (Placeholder)", self.stem)
    }
}

/// Lists the source documents of a directory in natural order.
#[derive(Debug, Clone)]
pub struct SourceScanner {
    extension: String,
    prefix: Option<String>,
}

impl SourceScanner {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            extension: config.extension().to_string(),
            prefix: config.prefix().map(str::to_string),
        }
    }

    /// Paths of the matching regular files of `dir`, naturally ordered by
    /// file name.
    ///
    /// # Errors
    ///
    /// Returns [`CalloutError::Scan`] if the directory cannot be listed.
    pub fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, CalloutError> {
        let scan_error = |source| CalloutError::Scan {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(scan_error)? {
            let path = entry.map_err(scan_error)?.path();
            if path.is_file() && self.matches(&path) {
                paths.push(path);
            } else {
                trace!(path:? = path; "Ignoring directory entry");
            }
        }

        paths.sort_by(|a, b| natural_cmp(&file_name(a), &file_name(b)));
        debug!(dir:? = dir, documents = paths.len(); "Source directory scanned");
        Ok(paths)
    }

    /// Reads every matching document of `dir` in natural order.
    ///
    /// # Errors
    ///
    /// Returns [`CalloutError::Scan`] if the directory or one of its
    /// documents cannot be read.
    pub fn scan(&self, dir: &Path) -> Result<Vec<SourceDocument>, CalloutError> {
        self.list(dir)?
            .iter()
            .map(|path| SourceDocument::read(path))
            .collect()
    }

    fn matches(&self, path: &Path) -> bool {
        let extension_matches = path
            .extension()
            .is_some_and(|extension| extension == self.extension.as_str());
        let prefix_matches = self
            .prefix
            .as_deref()
            .is_none_or(|prefix| file_name(path).starts_with(prefix));
        extension_matches && prefix_matches
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A run of digits or of non-digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());

        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits {
            Chunk::Digits(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}

/// Compares names so that embedded numbers sort by value (`svg2` before
/// `svg10`).
///
/// Digit runs compare numerically, text runs lexicographically and a digit
/// run sorts before a text run. Names that compare equal this way (`svg01`,
/// `svg1`) fall back to plain string order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks { rest: a };
    let mut right = Chunks { rest: b };

    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(Chunk::Digits(x)), Some(Chunk::Digits(y))) => {
                let x = x.trim_start_matches('0');
                let y = y.trim_start_matches('0');
                x.len().cmp(&y.len()).then_with(|| x.cmp(y))
            }
            (Some(Chunk::Text(x)), Some(Chunk::Text(y))) => x.cmp(y),
            (Some(Chunk::Digits(_)), Some(Chunk::Text(_))) => Ordering::Less,
            (Some(Chunk::Text(_)), Some(Chunk::Digits(_))) => Ordering::Greater,
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, text: &str) {
        fs::write(dir.path().join(name), text).unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths.iter().map(|path| file_name(path)).collect()
    }

    #[test]
    fn test_natural_cmp() {
        assert_eq!(natural_cmp("shape2.md", "shape10.md"), Ordering::Less);
        assert_eq!(natural_cmp("svg10.md", "svg9.md"), Ordering::Greater);
        assert_eq!(natural_cmp("a.md", "b.md"), Ordering::Less);
        assert_eq!(natural_cmp("svg1.md", "svg1.md"), Ordering::Equal);
        assert_eq!(natural_cmp("svg01.md", "svg1.md"), Ordering::Less);
        assert_eq!(natural_cmp("svg1.md", "svg1b.md"), Ordering::Less);
        assert_eq!(natural_cmp("7.md", "a.md"), Ordering::Less);
    }

    #[test]
    fn test_document_identity() {
        let document = SourceDocument::new("/corpus/Speech Bubble 3.md", "text");

        assert_eq!(document.stem(), "Speech Bubble 3");
        assert_eq!(document.id(), "speech_bubble_3");
        assert_eq!(document.file_name(), "Speech Bubble 3.md");
        assert_eq!(document.display_name(), "Imported Speech Bubble 3");
        assert_eq!(
            document.placeholder_name(),
            "Imported Speech Bubble 3 (Placeholder)"
        );
    }

    #[test]
    fn test_read_decodes_lossily() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.md");
        fs::write(&path, b"<svg>\xff</svg>").unwrap();

        let document = SourceDocument::read(&path).unwrap();

        assert_eq!(document.text(), "<svg>\u{fffd}</svg>");
    }

    #[test]
    fn test_list_filters_and_orders() {
        let dir = TempDir::new().unwrap();
        write(&dir, "svg10.md", "");
        write(&dir, "svg2.md", "");
        write(&dir, "svg1.md", "");
        write(&dir, "notes.txt", "");
        write(&dir, "README.MD", "");
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let scanner = SourceScanner::new(&ScanConfig::default());
        let paths = scanner.list(dir.path()).unwrap();

        assert_eq!(names(&paths), vec!["svg1.md", "svg2.md", "svg10.md"]);
    }

    #[test]
    fn test_list_with_prefix() {
        let dir = TempDir::new().unwrap();
        write(&dir, "svg3.md", "");
        write(&dir, "draft.md", "");

        let scanner = SourceScanner::new(&ScanConfig::new("md", Some("svg".to_string())));
        let paths = scanner.list(dir.path()).unwrap();

        assert_eq!(names(&paths), vec!["svg3.md"]);
    }

    #[test]
    fn test_missing_directory_is_scan_error() {
        let dir = TempDir::new().unwrap();
        let scanner = SourceScanner::new(&ScanConfig::default());

        let err = scanner.list(&dir.path().join("missing")).unwrap_err();

        assert!(matches!(err, CalloutError::Scan { .. }));
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn numbered_names_sort_by_value(a in 0u32..100_000, b in 0u32..100_000) {
                let left = format!("svg{a}.md");
                let right = format!("svg{b}.md");
                prop_assert_eq!(natural_cmp(&left, &right), a.cmp(&b));
            }

            #[test]
            fn ordering_is_antisymmetric(a in "[a-c0-9]{0,6}", b in "[a-c0-9]{0,6}") {
                prop_assert_eq!(natural_cmp(&a, &b), natural_cmp(&b, &a).reverse());
            }
        }
    }
}
