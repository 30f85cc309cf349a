//! Collection of outline path data from a markup tree.

use log::trace;

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    markup::MarkupNode,
};

/// The `d` values of every `path` element of a fragment, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundPath {
    segments: Vec<String>,
}

impl CompoundPath {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Join all segments with a single space, preserving their order.
    pub fn to_path_data(&self) -> String {
        self.segments.join(" ")
    }
}

/// Walks a markup tree and gathers its path data.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathCollector {
    collapse_whitespace: bool,
}

impl PathCollector {
    /// # Arguments
    ///
    /// * `collapse_whitespace` - Collapse whitespace runs inside each `d`
    ///   value to a single space and trim it.
    pub fn new(collapse_whitespace: bool) -> Self {
        Self {
            collapse_whitespace,
        }
    }

    /// Collect the `d` attribute of every `path` element below (and
    /// including) `root`, depth-first in document order.
    ///
    /// Blank `d` values are skipped.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorCode::E200`] diagnostic if no path data is found.
    pub fn collect(&self, root: &MarkupNode) -> Result<CompoundPath> {
        let segments: Vec<String> = root
            .descendants()
            .filter(|node| node.name() == "path")
            .filter_map(|node| node.attribute("d"))
            .filter(|data| !data.trim().is_empty())
            .map(|data| {
                if self.collapse_whitespace {
                    data.split_whitespace().collect::<Vec<_>>().join(" ")
                } else {
                    data.to_string()
                }
            })
            .collect();

        if segments.is_empty() {
            return Err(Diagnostic::error("markup contains no path data")
                .with_code(ErrorCode::E200)
                .with_label(root.span(), "no `path` element with a `d` attribute in here")
                .with_help("a callout shape needs at least one `<path d=\"...\"/>` element"));
        }

        trace!(segments = segments.len(); "Collected path data");
        Ok(CompoundPath { segments })
    }
}
