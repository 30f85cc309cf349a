//! # Callout Parser
//!
//! Extraction of callout shapes from the vector markup embedded in text
//! documents. A document goes through these stages:
//!
//! 1. **Isolate** - find the first `<svg>` fragment and reject raster content
//! 2. **Parse** - build a markup tree with the configured [`ParseStrategy`]
//! 3. **Collect** - join every `<path d>` value in document order
//! 4. **Normalize** - derive the shape frame from the declared bounds
//!
//! Every failure is reported as a [`Diagnostic`](error::Diagnostic) carrying
//! an error code and labels that point into the document.
//!
//! ## Usage
//!
//! ```
//! # use callout_parser::{extract, ExtractConfig, error::Diagnostic};
//!
//! fn main() -> Result<(), Diagnostic> {
//!     let document = r#"Oval callout
//! <svg viewBox="0 0 100 50"><path d="M0,0 L100,50"/></svg>
//! "#;
//!
//!     let shape = extract(document, &ExtractConfig::default())?;
//!     assert_eq!(shape.path_data(), "M0,0 L100,50");
//!     assert_eq!(shape.frame().center_offset_y(), 25.0);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod extract;
pub mod frame;
pub mod markup;
pub mod path;
mod span;

pub use markup::{MarkupParser, ParseStrategy};
pub use path::{CompoundPath, PathCollector};
pub use span::Span;

use callout_core::geometry::ShapeFrame;
use log::trace;
use serde::Deserialize;

/// Configuration of the extraction stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Markup parser used to build the tree.
    #[serde(rename = "parser")]
    pub strategy: ParseStrategy,
    /// Collapse whitespace runs inside path data.
    pub collapse_whitespace: bool,
}

/// A shape extracted from one document.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedShape {
    path: CompoundPath,
    frame: ShapeFrame,
}

impl ExtractedShape {
    pub fn path(&self) -> &CompoundPath {
        &self.path
    }

    /// The compound path data, segments joined with a single space.
    pub fn path_data(&self) -> String {
        self.path.to_path_data()
    }

    pub fn frame(&self) -> ShapeFrame {
        self.frame
    }
}

/// Extract the callout shape embedded in `document`.
///
/// # Arguments
///
/// * `document` - Full text of the source document
/// * `config` - Parser selection and path data options
///
/// # Errors
///
/// Returns the [`Diagnostic`](error::Diagnostic) of the first stage that
/// fails; its labels refer to byte offsets in `document`.
pub fn extract(document: &str, config: &ExtractConfig) -> error::Result<ExtractedShape> {
    // Step 1: Isolate
    let fragment = extract::find_fragment(document)?;
    extract::reject_raster(&fragment)?;

    // Step 2: Parse
    let root = config.strategy.parse(&fragment)?;

    // Step 3: Collect
    let path = PathCollector::new(config.collapse_whitespace).collect(&root)?;

    // Step 4: Normalize
    let frame = frame::normalize(&root)?;

    trace!(segments = path.len(), width = frame.width(), height = frame.height(); "Extracted shape");
    Ok(ExtractedShape { path, frame })
}
