//! Assembly of the callout table from the baseline and source documents.
//!
//! The [`RegistryAssembler`] owns the table while it is built. Baseline
//! entries go in first, then one entry per source document in scan order.
//! A document that fails extraction is handled by the [`FailurePolicy`]:
//! skipped under [`FailurePolicy::Strict`], replaced by a placeholder shape
//! under [`FailurePolicy::Lenient`]. Either way the failure is logged and
//! recorded in the [`GenerationReport`].

use std::{fmt, path::PathBuf, str::FromStr};

use indexmap::IndexMap;
use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

use callout_core::{
    entry::CalloutEntry, geometry::ShapeFrame, identifier::CalloutId, table::CalloutTable,
};
use callout_parser::{ExtractConfig, error::Diagnostic};

use crate::{baseline::Baseline, error::CalloutError, scanner::SourceDocument};

/// Path data of the placeholder shape, an oval with a tail at the bottom left.
pub const PLACEHOLDER_PATH: &str = "M 50,10 Q 90,10 90,50 Q 90,90 50,90 Q 10,90 10,50 Q 10,10 50,10 Z M 20,80 Q 10,100 0,100 L 30,90";

/// Frame of the placeholder shape.
pub const PLACEHOLDER_FRAME: ShapeFrame = ShapeFrame::new(100.0, 110.0, 50.0, 50.0);

/// What happens to a document whose extraction fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Leave the document out of the table.
    #[default]
    Strict,
    /// Insert a placeholder entry for the document.
    Lenient,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Lenient => f.write_str("lenient"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown failure policy `{0}` (expected `strict` or `lenient`)")]
pub struct UnknownPolicy(String);

impl FromStr for FailurePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

/// A document that failed extraction.
#[derive(Debug, Clone)]
pub struct Failure {
    diagnostic: Diagnostic,
    text: String,
}

impl Failure {
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// Document text the diagnostic's labels point into.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The result of assembling one document.
#[derive(Debug, Clone)]
pub enum DocumentOutcome {
    Loaded,
    Skipped(Failure),
    Placeholder(Failure),
}

impl DocumentOutcome {
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Loaded => None,
            Self::Skipped(failure) | Self::Placeholder(failure) => Some(failure),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentReport {
    path: PathBuf,
    id: CalloutId,
    outcome: DocumentOutcome,
}

impl DocumentReport {
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn id(&self) -> &CalloutId {
        &self.id
    }

    pub fn outcome(&self) -> &DocumentOutcome {
        &self.outcome
    }
}

/// An entry overwritten by a later entry with the same identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    id: CalloutId,
    replaced: String,
    replacing: String,
}

impl Collision {
    pub fn id(&self) -> &CalloutId {
        &self.id
    }

    /// Display name of the entry that was overwritten.
    pub fn replaced(&self) -> &str {
        &self.replaced
    }

    /// Display name of the entry that took its place.
    pub fn replacing(&self) -> &str {
        &self.replacing
    }
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}`: \"{}\" replaced by \"{}\"",
            self.id, self.replaced, self.replacing
        )
    }
}

/// Per-document outcomes and collisions of one assembly run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    documents: Vec<DocumentReport>,
    collisions: Vec<Collision>,
}

impl GenerationReport {
    pub fn documents(&self) -> &[DocumentReport] {
        &self.documents
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    pub fn loaded(&self) -> usize {
        self.count(|outcome| matches!(outcome, DocumentOutcome::Loaded))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, DocumentOutcome::Skipped(_)))
    }

    pub fn placeholders(&self) -> usize {
        self.count(|outcome| matches!(outcome, DocumentOutcome::Placeholder(_)))
    }

    fn count(&self, predicate: impl Fn(&DocumentOutcome) -> bool) -> usize {
        self.documents
            .iter()
            .filter(|document| predicate(&document.outcome))
            .count()
    }
}

/// Builds a [`CalloutTable`] one document at a time.
///
/// # Examples
///
/// ```
/// # use callout::{
/// #     assembler::{FailurePolicy, RegistryAssembler, PLACEHOLDER_PATH},
/// #     baseline::Baseline,
/// #     scanner::SourceDocument,
/// # };
/// # use callout_parser::ExtractConfig;
/// let mut assembler =
///     RegistryAssembler::new(FailurePolicy::Lenient, ExtractConfig::default(), &Baseline::empty());
///
/// assembler.add_document(SourceDocument::new(
///     "oval.md",
///     r#"<svg viewBox="0 0 100 50"><path d="M0,0 L100,50"/></svg>"#,
/// ));
/// assembler.add_document(SourceDocument::new("photo.md", r#"<svg><image href="x.png"/></svg>"#));
///
/// let (table, report) = assembler.finish(&"oval".into()).unwrap();
/// assert_eq!(table.get("oval").unwrap().path(), "M0,0 L100,50");
/// assert_eq!(table.get("photo").unwrap().path(), PLACEHOLDER_PATH);
/// assert_eq!(report.placeholders(), 1);
/// ```
#[derive(Debug)]
pub struct RegistryAssembler {
    policy: FailurePolicy,
    extract: ExtractConfig,
    entries: IndexMap<CalloutId, CalloutEntry>,
    report: GenerationReport,
}

impl RegistryAssembler {
    /// Creates an assembler whose table starts with the baseline entries.
    ///
    /// # Arguments
    ///
    /// * `policy` - Handling of documents that fail extraction.
    /// * `extract` - Extraction settings applied to every document.
    /// * `baseline` - Entries placed at the start of the table.
    pub fn new(policy: FailurePolicy, extract: ExtractConfig, baseline: &Baseline) -> Self {
        let mut assembler = Self {
            policy,
            extract,
            entries: IndexMap::with_capacity(baseline.len()),
            report: GenerationReport::default(),
        };
        for entry in baseline.entries() {
            assembler.insert(entry.clone());
        }
        assembler
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Extracts `document` and adds the resulting entry to the table.
    ///
    /// Extraction failures never abort assembly; the policy decides whether
    /// the document is skipped or replaced by a placeholder.
    pub fn add_document(&mut self, document: SourceDocument) {
        let file = document.file_name();

        let outcome = match callout_parser::extract(document.text(), &self.extract) {
            Ok(shape) => {
                let entry = CalloutEntry::new(
                    document.id().clone(),
                    document.display_name(),
                    shape.path_data(),
                    shape.frame(),
                );
                info!(file = file, id:% = document.id(), segments = shape.path().len(); "Loaded callout");
                self.insert(entry);
                DocumentOutcome::Loaded
            }
            Err(diagnostic) => {
                let failure = Failure {
                    diagnostic,
                    text: document.text().to_string(),
                };
                match self.policy {
                    FailurePolicy::Strict => {
                        warn!(file = file, diagnostic:% = failure.diagnostic; "Skipped document");
                        DocumentOutcome::Skipped(failure)
                    }
                    FailurePolicy::Lenient => {
                        warn!(file = file, diagnostic:% = failure.diagnostic; "Substituted placeholder");
                        self.insert(CalloutEntry::new(
                            document.id().clone(),
                            document.placeholder_name(),
                            PLACEHOLDER_PATH,
                            PLACEHOLDER_FRAME,
                        ));
                        DocumentOutcome::Placeholder(failure)
                    }
                }
            }
        };

        self.report.documents.push(DocumentReport {
            path: document.path().to_path_buf(),
            id: document.id().clone(),
            outcome,
        });
    }

    /// Finalizes the table with `default_id` as its default entry.
    ///
    /// # Errors
    ///
    /// Returns [`CalloutError::MissingDefault`] if no entry has that
    /// identifier.
    pub fn finish(
        self,
        default_id: &CalloutId,
    ) -> Result<(CalloutTable, GenerationReport), CalloutError> {
        let table = CalloutTable::new(self.entries, default_id.clone())?;
        Ok((table, self.report))
    }

    /// Inserts `entry`, overwriting and recording any entry with the same id.
    fn insert(&mut self, entry: CalloutEntry) {
        let replacing = entry.name().to_string();
        if let Some(replaced) = self.entries.insert(entry.id().clone(), entry) {
            let collision = Collision {
                id: replaced.id().clone(),
                replaced: replaced.name().to_string(),
                replacing,
            };
            warn!(
                id:% = collision.id,
                replaced = collision.replaced,
                replacing = collision.replacing;
                "Callout identifier collision, entry overwritten",
            );
            self.report.collisions.push(collision);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use callout_parser::error::ErrorCode;

    const OVAL: &str = r#"<svg viewBox="0 0 100 50"><path d="M0,0 L100,50"/></svg>"#;
    const RASTER: &str = r#"<svg viewBox="0 0 10 10"><image href="x.png"/></svg>"#;

    fn baseline() -> Baseline {
        Baseline::from_toml(
            r#"
            version = 1

            [[entry]]
            id = "speech_oval_bl"
            name = "Oval (Tail BL)"
            path = "M 1,1 Z"
            frame = { width = 100.0, height = 110.0, center_offset_x = 50.0, center_offset_y = 50.0 }

            [[entry]]
            id = "shout_star"
            name = "Star"
            path = "M 2,2 Z"
            frame = { width = 140.0, height = 100.0, center_offset_x = 70.0, center_offset_y = 50.0 }
            "#,
        )
        .unwrap()
    }

    fn assembler(policy: FailurePolicy) -> RegistryAssembler {
        RegistryAssembler::new(policy, ExtractConfig::default(), &baseline())
    }

    fn default_id() -> CalloutId {
        CalloutId::new("speech_oval_bl")
    }

    fn ids(table: &CalloutTable) -> Vec<&str> {
        table.entries().map(|entry| entry.id().as_str()).collect()
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strict".parse(), Ok(FailurePolicy::Strict));
        assert_eq!("lenient".parse(), Ok(FailurePolicy::Lenient));
        assert!("Lenient".parse::<FailurePolicy>().is_err());
        assert_eq!(FailurePolicy::Lenient.to_string(), "lenient");
    }

    #[test]
    fn test_baseline_first_then_documents_in_order() {
        let mut assembler = assembler(FailurePolicy::Strict);
        assembler.add_document(SourceDocument::new("svg2.md", OVAL));
        assembler.add_document(SourceDocument::new("svg10.md", OVAL));

        let (table, report) = assembler.finish(&default_id()).unwrap();

        assert_eq!(ids(&table), vec!["speech_oval_bl", "shout_star", "svg2", "svg10"]);
        assert_eq!(report.loaded(), 2);
        assert!(report.collisions().is_empty());

        let entry = table.get("svg2").unwrap();
        assert_eq!(entry.name(), "Imported svg2");
        assert_eq!(entry.path(), "M0,0 L100,50");
        assert_eq!(entry.frame(), ShapeFrame::new(100.0, 50.0, 50.0, 25.0));
    }

    #[test]
    fn test_strict_policy_skips_failures() {
        let mut assembler = assembler(FailurePolicy::Strict);
        assembler.add_document(SourceDocument::new("photo.md", RASTER));

        let (table, report) = assembler.finish(&default_id()).unwrap();

        assert!(!table.contains("photo"));
        assert_eq!(report.skipped(), 1);
        let failure = report.documents()[0].outcome().failure().unwrap();
        assert_eq!(failure.diagnostic().code(), Some(ErrorCode::E002));
        assert_eq!(failure.text(), RASTER);
    }

    #[test]
    fn test_lenient_policy_substitutes_placeholder() {
        let mut assembler = assembler(FailurePolicy::Lenient);
        assembler.add_document(SourceDocument::new("photo.md", RASTER));
        assembler.add_document(SourceDocument::new("empty.md", "no markup"));

        let (table, report) = assembler.finish(&default_id()).unwrap();

        let entry = table.get("photo").unwrap();
        assert_eq!(entry.path(), PLACEHOLDER_PATH);
        assert_eq!(entry.frame(), PLACEHOLDER_FRAME);
        assert!(entry.name().ends_with("(Placeholder)"));
        assert!(table.contains("empty"));
        assert_eq!(report.placeholders(), 2);
    }

    #[test]
    fn test_lenient_policy_covers_degenerate_frames() {
        let mut assembler = assembler(FailurePolicy::Lenient);
        assembler.add_document(SourceDocument::new(
            "flat.md",
            r#"<svg viewBox="0 0 0 0"><path d="M0Z"/></svg>"#,
        ));

        let (table, _) = assembler.finish(&default_id()).unwrap();

        assert_eq!(table.get("flat").unwrap().frame(), PLACEHOLDER_FRAME);
    }

    #[test]
    fn test_collision_with_baseline_overwrites_in_place() {
        let mut assembler = assembler(FailurePolicy::Strict);
        assembler.add_document(SourceDocument::new("Shout Star.md", OVAL));

        let (table, report) = assembler.finish(&default_id()).unwrap();

        assert_eq!(ids(&table), vec!["speech_oval_bl", "shout_star"]);
        assert_eq!(table.get("shout_star").unwrap().name(), "Imported Shout Star");

        let collisions = report.collisions();
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].id(), "shout_star");
        assert_eq!(collisions[0].replaced(), "Star");
        assert_eq!(collisions[0].replacing(), "Imported Shout Star");
    }

    #[test]
    fn test_one_collision_per_overwrite() {
        let mut assembler = assembler(FailurePolicy::Lenient);
        assembler.add_document(SourceDocument::new("a/dup.md", OVAL));
        assembler.add_document(SourceDocument::new("b/Dup.md", RASTER));
        assembler.add_document(SourceDocument::new("c/DUP.md", OVAL));

        let (table, report) = assembler.finish(&default_id()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(report.collisions().len(), 2);
        assert_eq!(table.get("dup").unwrap().name(), "Imported DUP");
    }

    #[test]
    fn test_missing_default() {
        let assembler = RegistryAssembler::new(
            FailurePolicy::Strict,
            ExtractConfig::default(),
            &Baseline::empty(),
        );

        let err = assembler.finish(&default_id()).unwrap_err();

        assert!(matches!(err, CalloutError::MissingDefault(id) if id == "speech_oval_bl"));
    }

    #[test]
    fn test_default_may_come_from_documents() {
        let mut assembler = RegistryAssembler::new(
            FailurePolicy::Strict,
            ExtractConfig::default(),
            &Baseline::empty(),
        );
        assembler.add_document(SourceDocument::new("svg1.md", OVAL));

        let (table, _) = assembler.finish(&CalloutId::new("svg1")).unwrap();

        assert_eq!(table.default_entry().name(), "Imported svg1");
    }
}
