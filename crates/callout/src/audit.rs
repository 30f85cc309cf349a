//! Corpus audit: a robustness report over all source documents.
//!
//! The audit reads each document with the pattern scanner over its full
//! text, bypassing fragment isolation and structural parsing, and lists every
//! `d` attribute it finds. The longest one is listed first as the likely main
//! outline. Next to that it shows what the production pipeline makes of the
//! same document. The audit never influences the generated table.

use std::fmt;

use callout_parser::{
    ExtractConfig, MarkupParser,
    error::Diagnostic,
    extract::Fragment,
    markup::PatternScanner,
};

use crate::scanner::SourceDocument;

const PREVIEW_CHARS: usize = 50;
const SNIPPET_CHARS: usize = 200;

/// The audit result of one document.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    file_name: String,
    paths: Vec<String>,
    snippet: String,
    verdict: Result<(), Diagnostic>,
}

impl AuditRecord {
    /// Audits `document`, judging it with `config` as generation would.
    pub fn new(document: &SourceDocument, config: &ExtractConfig) -> Self {
        let text = document.text();

        let mut paths: Vec<String> = match PatternScanner.parse(&Fragment::whole(text)) {
            Ok(root) => root
                .descendants()
                .filter_map(|node| node.attribute("d"))
                .map(str::to_string)
                .collect(),
            Err(_) => Vec::new(),
        };
        paths.sort_by_key(|path| std::cmp::Reverse(path.chars().count()));

        Self {
            file_name: document.file_name(),
            paths,
            snippet: text.chars().take(SNIPPET_CHARS).collect(),
            verdict: callout_parser::extract(text, config).map(|_| ()),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Path data found in the document, longest first.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// The longest path data, if any.
    pub fn main_path(&self) -> Option<&str> {
        self.paths.first().map(String::as_str)
    }

    /// What generation does with the document.
    pub fn verdict(&self) -> Result<(), &Diagnostic> {
        self.verdict.as_ref().map(|_| ())
    }
}

impl fmt::Display for AuditRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {} paths detected", self.file_name, self.paths.len())?;

        if self.paths.is_empty() {
            writeln!(f, "  NO PATHS FOUND! Content snippet:")?;
            writeln!(f, "{}", self.snippet)?;
        }
        for (index, path) in self.paths.iter().enumerate() {
            let preview: String = path.chars().take(PREVIEW_CHARS).collect();
            writeln!(
                f,
                "  Path {} (Length {}): {preview}...",
                index + 1,
                path.chars().count()
            )?;
        }

        match &self.verdict {
            Ok(()) => write!(f, "  verdict: ok"),
            Err(diagnostic) => write!(f, "  verdict: {diagnostic}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use callout_parser::error::ErrorCode;

    fn audit(text: &str) -> AuditRecord {
        AuditRecord::new(&SourceDocument::new("svg7.md", text), &ExtractConfig::default())
    }

    #[test]
    fn test_paths_longest_first() {
        let record = audit(r#"<svg viewBox="0 0 9 9"><path d="M1Z"/><path d="M 1,1 L 2,2 Z"/></svg>"#);

        assert_eq!(record.paths(), ["M 1,1 L 2,2 Z", "M1Z"]);
        assert_eq!(record.main_path(), Some("M 1,1 L 2,2 Z"));
        assert!(record.verdict().is_ok());
        assert_eq!(
            record.to_string(),
            "svg7.md: 2 paths detected\n  Path 1 (Length 13): M 1,1 L 2,2 Z...\n  Path 2 (Length 3): M1Z...\n  verdict: ok"
        );
    }

    #[test]
    fn test_scans_outside_fragment_and_broken_markup() {
        let record = audit("<path d='M0Z'>\n<svg viewBox=\"0 0 9 9\"><g><path d=\"M5Z\"></svg>");

        assert_eq!(record.paths().len(), 2);
        let diagnostic = record.verdict().unwrap_err();
        assert_eq!(diagnostic.code(), Some(ErrorCode::E100));
        assert!(record.to_string().ends_with(&format!("  verdict: {diagnostic}")));
    }

    #[test]
    fn test_preview_is_truncated() {
        let long = "L 1,1 ".repeat(20);
        let record = audit(&format!(r#"<svg viewBox="0 0 9 9"><path d="{long}"/></svg>"#));

        let line = record.to_string().lines().nth(1).unwrap().to_string();
        assert_eq!(line, format!("  Path 1 (Length 120): {}...", &long[..50]));
    }

    #[test]
    fn test_no_paths_found() {
        let text = format!("# Notes\n{}", "x".repeat(300));
        let record = audit(&text);

        let report = record.to_string();
        assert!(report.starts_with("svg7.md: 0 paths detected\n  NO PATHS FOUND! Content snippet:\n# Notes\n"));
        assert!(report.contains(&"x".repeat(192)));
        assert!(!report.contains(&"x".repeat(193)));
        assert!(report.ends_with("  verdict: error[E001]: no vector markup found in document"));
    }
}
