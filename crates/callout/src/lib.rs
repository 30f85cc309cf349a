//! Callout - compiles vector callout shapes embedded in text documents into a
//! static shape table.
//!
//! A generation run scans a directory of documents, extracts the `<svg>`
//! markup embedded in each, merges the resulting shapes with a hand-authored
//! baseline and writes the table as a TypeScript module. [`RegistryBuilder`]
//! drives the stages; each stage is also usable on its own.

pub mod assembler;
pub mod audit;
pub mod baseline;
pub mod config;
pub mod emitter;
pub mod scanner;

mod error;

pub use callout_core::{entry, geometry, identifier, table};

pub use assembler::{FailurePolicy, GenerationReport};
pub use error::CalloutError;

use std::path::Path;

use log::{debug, info};

use assembler::RegistryAssembler;
use audit::AuditRecord;
use baseline::Baseline;
use config::AppConfig;
use emitter::CodeEmitter;
use scanner::{SourceDocument, SourceScanner};
use table::CalloutTable;

/// Builder for generating callout registries.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use callout::{FailurePolicy, RegistryBuilder, config::AppConfig};
///
/// let config = AppConfig::default().with_policy(FailurePolicy::Lenient);
/// let builder = RegistryBuilder::new(config);
///
/// let report = builder
///     .generate(Path::new("reference/callouts"), Path::new("CalloutRegistry.ts"))
///     .expect("Failed to generate registry");
///
/// println!("{} shapes loaded", report.loaded());
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    config: AppConfig,
}

impl RegistryBuilder {
    /// Create a new registry builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load the baseline selected by the configuration.
    ///
    /// # Errors
    ///
    /// Returns `CalloutError` if a configured baseline file cannot be read,
    /// or if the baseline is invalid.
    pub fn load_baseline(&self) -> Result<Baseline, CalloutError> {
        let registry = self.config.registry();
        if !registry.include_baseline() {
            debug!("Baseline disabled");
            return Ok(Baseline::empty());
        }
        match registry.baseline() {
            Some(path) => {
                info!(path:? = path; "Loading baseline file");
                Baseline::load(path)
            }
            None => Baseline::bundled(),
        }
    }

    /// Read the source documents of `dir` in natural file name order.
    ///
    /// # Errors
    ///
    /// Returns [`CalloutError::Scan`] if the directory or a document cannot
    /// be read.
    pub fn scan(&self, dir: &Path) -> Result<Vec<SourceDocument>, CalloutError> {
        SourceScanner::new(self.config.scan()).scan(dir)
    }

    /// Assemble the table from the baseline and `documents`.
    ///
    /// # Errors
    ///
    /// Returns `CalloutError` if the baseline cannot be loaded or the default
    /// entry is missing from the assembled table.
    pub fn assemble(
        &self,
        documents: Vec<SourceDocument>,
    ) -> Result<(CalloutTable, GenerationReport), CalloutError> {
        let baseline = self.load_baseline()?;
        let registry = self.config.registry();

        info!(
            documents = documents.len(),
            baseline = baseline.len(),
            policy:% = registry.policy();
            "Assembling callout table"
        );

        let mut assembler =
            RegistryAssembler::new(registry.policy(), *self.config.extract(), &baseline);
        for document in documents {
            assembler.add_document(document);
        }
        assembler.finish(registry.default_entry())
    }

    /// Render `table` as a TypeScript module.
    pub fn render(&self, table: &CalloutTable) -> String {
        CodeEmitter::new(self.config.output().clone()).render(table)
    }

    /// Run a full generation: scan `input_dir`, assemble, render and write
    /// the module to `output`.
    ///
    /// Nothing is written unless the whole table was assembled.
    ///
    /// # Errors
    ///
    /// Returns `CalloutError` for unreadable input, an invalid baseline, a
    /// missing default entry, or a failed write.
    pub fn generate(&self, input_dir: &Path, output: &Path) -> Result<GenerationReport, CalloutError> {
        let documents = self.scan(input_dir)?;
        let (table, report) = self.assemble(documents)?;

        let module = self.render(&table);
        emitter::write_module(output, &module)?;

        info!(
            entries = table.len(),
            loaded = report.loaded(),
            skipped = report.skipped(),
            placeholders = report.placeholders(),
            collisions = report.collisions().len();
            "Callout registry generated"
        );
        Ok(report)
    }

    /// Audit every source document of `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`CalloutError::Scan`] if the directory or a document cannot
    /// be read.
    pub fn audit(&self, dir: &Path) -> Result<Vec<AuditRecord>, CalloutError> {
        let records: Vec<_> = self
            .scan(dir)?
            .iter()
            .map(|document| AuditRecord::new(document, self.config.extract()))
            .collect();

        info!(documents = records.len(); "Audit complete");
        Ok(records)
    }
}
