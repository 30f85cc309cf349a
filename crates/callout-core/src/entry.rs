//! The callout entry record.

use serde::Deserialize;

use crate::{geometry::ShapeFrame, identifier::CalloutId};

/// A single shape definition of the compiled table.
///
/// The path is a compound outline: one or more SVG path data strings joined
/// with a single space, in the order they were drawn.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalloutEntry {
    id: CalloutId,
    name: String,
    path: String,
    frame: ShapeFrame,
}

impl CalloutEntry {
    /// Creates a new entry.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique table key of the entry.
    /// * `name` - Human readable label shown by the drawing application.
    /// * `path` - Compound SVG path data.
    /// * `frame` - Bounding frame used for placement and scaling.
    pub fn new(
        id: CalloutId,
        name: impl Into<String>,
        path: impl Into<String>,
        frame: ShapeFrame,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            path: path.into(),
            frame,
        }
    }

    pub fn id(&self) -> &CalloutId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn frame(&self) -> ShapeFrame {
        self.frame
    }
}
