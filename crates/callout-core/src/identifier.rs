//! Identifiers for callout table entries.
//!
//! This module provides the [`CalloutId`] type used as the key of a
//! [`CalloutTable`](crate::table::CalloutTable).

use std::{borrow::Borrow, fmt};

use serde::Deserialize;

/// Unique key of a callout entry.
///
/// Identifiers of generated entries are derived from the name of the source
/// document with [`CalloutId::from_file_stem`]. Baseline identifiers are taken
/// verbatim from the baseline table.
///
/// # Examples
///
/// ```
/// use callout_core::identifier::CalloutId;
///
/// let id = CalloutId::from_file_stem("Speech Bubble 12");
/// assert_eq!(id, "speech_bubble_12");
///
/// let baseline = CalloutId::new("speech_oval_bl");
/// assert_eq!(baseline.as_str(), "speech_oval_bl");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct CalloutId(String);

impl CalloutId {
    /// Creates an identifier from its exact string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives an identifier from a document file stem.
    ///
    /// The stem is lowercased and every space is replaced with an underscore.
    pub fn from_file_stem(stem: &str) -> Self {
        Self(stem.to_lowercase().replace(' ', "_"))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CalloutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CalloutId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CalloutId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CalloutId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CalloutId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&str> for CalloutId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
