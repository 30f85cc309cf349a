//! The compiled callout table.
//!
//! A [`CalloutTable`] is an insertion-ordered mapping from [`CalloutId`] to
//! [`CalloutEntry`] with one entry designated as the default shape. The table
//! can only be constructed when the default entry is present.

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use crate::{entry::CalloutEntry, identifier::CalloutId};

/// Errors raised while finalizing a table.
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("default entry `{0}` is missing from the callout table")]
    MissingDefault(CalloutId),
}

/// Ordered mapping of callout entries with a designated default.
///
/// # Examples
///
/// ```
/// # use callout_core::{
/// #     entry::CalloutEntry, geometry::ShapeFrame, identifier::CalloutId, table::CalloutTable,
/// # };
/// # use indexmap::IndexMap;
/// let id = CalloutId::new("speech_oval_bl");
/// let entry = CalloutEntry::new(id.clone(), "Oval", "M 0,0 Z", ShapeFrame::from_size(10.0, 10.0));
///
/// let mut entries = IndexMap::new();
/// entries.insert(id.clone(), entry);
///
/// let table = CalloutTable::new(entries, id).expect("default is present");
/// assert_eq!(table.default_entry().name(), "Oval");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CalloutTable {
    entries: IndexMap<CalloutId, CalloutEntry>,
    default_id: CalloutId,
}

impl CalloutTable {
    /// Creates a table from ordered entries and the identifier of the default entry.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MissingDefault`] if `default_id` is not a key of
    /// `entries`.
    pub fn new(
        entries: IndexMap<CalloutId, CalloutEntry>,
        default_id: CalloutId,
    ) -> Result<Self, TableError> {
        if !entries.contains_key(&default_id) {
            return Err(TableError::MissingDefault(default_id));
        }

        debug!(entries = entries.len(), default_id:% = default_id; "Callout table finalized");

        Ok(Self {
            entries,
            default_id,
        })
    }

    /// Returns the entry stored under `id`.
    pub fn get(&self, id: &str) -> Option<&CalloutEntry> {
        self.entries.get(id)
    }

    /// Returns true if an entry is stored under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Iterates over the entries in table order.
    pub fn entries(&self) -> impl Iterator<Item = &CalloutEntry> {
        self.entries.values()
    }

    /// Returns the identifier of the default entry.
    pub fn default_id(&self) -> &CalloutId {
        &self.default_id
    }

    /// Returns the default entry.
    pub fn default_entry(&self) -> &CalloutEntry {
        &self.entries[&self.default_id]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
