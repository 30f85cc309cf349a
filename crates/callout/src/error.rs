//! Error types for callout registry generation.
//!
//! Per-document extraction failures are not errors at this level: they are
//! [`Diagnostic`](callout_parser::error::Diagnostic) values recorded in the
//! generation report. [`CalloutError`] covers the conditions that abort a run.

use std::{io, path::PathBuf};

use thiserror::Error;

use callout_core::{identifier::CalloutId, table::TableError};

/// The main error type for callout operations.
#[derive(Debug, Error)]
pub enum CalloutError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot read source `{}`: {source}", path.display())]
    Scan { path: PathBuf, source: io::Error },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid baseline: {0}")]
    Baseline(String),

    #[error("default entry `{0}` is missing from the callout table")]
    MissingDefault(CalloutId),

    #[error("cannot write `{}`: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl From<TableError> for CalloutError {
    fn from(error: TableError) -> Self {
        match error {
            TableError::MissingDefault(id) => Self::MissingDefault(id),
        }
    }
}
