//! The hand-authored baseline table.
//!
//! Baseline entries are merged into every generated table ahead of the
//! entries generated from source documents. The bundled baseline is compiled
//! into the library; a replacement can be loaded from a TOML file with the
//! same layout:
//!
//! ```toml
//! version = 1
//!
//! [[entry]]
//! id = "speech_oval_bl"
//! name = "Oval (Tail BL)"
//! path = "M 50,10 Q 90,10 90,50 Z"
//! frame = { width = 100.0, height = 110.0, center_offset_x = 50.0, center_offset_y = 50.0 }
//! ```

use std::{collections::HashSet, fs, path::Path};

use log::debug;
use serde::Deserialize;

use callout_core::entry::CalloutEntry;

use crate::error::CalloutError;

const BUNDLED: &str = include_str!("baseline.toml");
const SUPPORTED_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BaselineFile {
    version: u32,
    #[serde(default, rename = "entry")]
    entries: Vec<CalloutEntry>,
}

/// A validated list of baseline entries, in table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Baseline {
    entries: Vec<CalloutEntry>,
}

impl Baseline {
    /// The baseline compiled into the library.
    ///
    /// # Errors
    ///
    /// Returns [`CalloutError::Baseline`] if the bundled table is invalid.
    pub fn bundled() -> Result<Self, CalloutError> {
        Self::from_toml(BUNDLED)
    }

    /// A baseline without entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads a baseline file.
    ///
    /// # Errors
    ///
    /// Returns [`CalloutError::Io`] if the file cannot be read and
    /// [`CalloutError::Baseline`] if it is invalid.
    pub fn load(path: &Path) -> Result<Self, CalloutError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text).map_err(|err| match err {
            CalloutError::Baseline(message) => {
                CalloutError::Baseline(format!("{}: {message}", path.display()))
            }
            err => err,
        })
    }

    /// Parses and validates a baseline document.
    ///
    /// The version must be supported, identifiers must be unique and frame
    /// sizes must be finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`CalloutError::Baseline`] describing the first problem found.
    pub fn from_toml(text: &str) -> Result<Self, CalloutError> {
        let file: BaselineFile =
            toml::from_str(text).map_err(|err| CalloutError::Baseline(err.to_string()))?;

        if file.version != SUPPORTED_VERSION {
            return Err(CalloutError::Baseline(format!(
                "unsupported version {} (expected {SUPPORTED_VERSION})",
                file.version
            )));
        }

        let mut seen = HashSet::new();
        for entry in &file.entries {
            if !seen.insert(entry.id().as_str()) {
                return Err(CalloutError::Baseline(format!(
                    "duplicate entry `{}`",
                    entry.id()
                )));
            }

            let frame = entry.frame();
            let valid = |value: f64| value.is_finite() && value >= 0.0;
            if !valid(frame.width()) || !valid(frame.height()) {
                return Err(CalloutError::Baseline(format!(
                    "entry `{}` has an invalid frame size {} x {}",
                    entry.id(),
                    frame.width(),
                    frame.height()
                )));
            }
        }

        debug!(entries = file.entries.len(); "Baseline loaded");
        Ok(Self {
            entries: file.entries,
        })
    }

    pub fn entries(&self) -> &[CalloutEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use callout_core::geometry::ShapeFrame;

    #[test]
    fn test_bundled_baseline() {
        let baseline = Baseline::bundled().unwrap();

        assert_eq!(baseline.len(), 28);

        let first = &baseline.entries()[0];
        assert_eq!(first.id(), "speech_oval_bl");
        assert_eq!(first.name(), "Oval (Tail BL)");
        assert_eq!(first.frame(), ShapeFrame::new(100.0, 110.0, 50.0, 50.0));

        let last = &baseline.entries()[27];
        assert_eq!(last.id(), "hollow_bold");
    }

    #[test]
    fn test_bundled_baseline_keeps_authored_offsets() {
        let baseline = Baseline::bundled().unwrap();

        let box_tl = baseline
            .entries()
            .iter()
            .find(|entry| entry.id() == "speech_box_tl")
            .unwrap();

        assert_eq!(box_tl.frame(), ShapeFrame::new(140.0, 130.0, 70.0, 45.0));
    }

    #[test]
    fn test_empty_entry_list() {
        let baseline = Baseline::from_toml("version = 1\n").unwrap();

        assert!(baseline.is_empty());
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let err = Baseline::from_toml("version = 2\n").unwrap_err();

        assert!(err.to_string().contains("unsupported version 2"));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let text = r#"
            version = 1

            [[entry]]
            id = "a"
            name = "A"
            path = "M0Z"
            frame = { width = 1.0, height = 1.0, center_offset_x = 0.5, center_offset_y = 0.5 }

            [[entry]]
            id = "a"
            name = "Again"
            path = "M1Z"
            frame = { width = 1.0, height = 1.0, center_offset_x = 0.5, center_offset_y = 0.5 }
        "#;

        let err = Baseline::from_toml(text).unwrap_err();

        assert!(err.to_string().contains("duplicate entry `a`"));
    }

    #[test]
    fn test_rejects_negative_frame() {
        let text = r#"
            version = 1

            [[entry]]
            id = "a"
            name = "A"
            path = "M0Z"
            frame = { width = -1.0, height = 1.0, center_offset_x = 0.0, center_offset_y = 0.5 }
        "#;

        assert!(matches!(
            Baseline::from_toml(text),
            Err(CalloutError::Baseline(_))
        ));
    }

    #[test]
    fn test_load_prefixes_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("baseline.toml");
        fs::write(&path, "version = 3\n").unwrap();

        let err = Baseline::load(&path).unwrap_err();

        assert!(err.to_string().contains("baseline.toml"));
    }
}
