//! Error and diagnostic system for callout extraction.
//!
//! Every per-document failure of the extraction pipeline is reported as a
//! [`Diagnostic`]: a message with an [`ErrorCode`], a [`Severity`], labelled
//! spans into the source document and optional help text. Extraction stops at
//! the first failing stage, so a single diagnostic describes why a document
//! produced no shape.
//!
//! # Example
//!
//! ```
//! # use callout_parser::error::{Diagnostic, ErrorCode};
//! # use callout_parser::Span;
//!
//! let diag = Diagnostic::error("fragment embeds a raster image")
//!     .with_code(ErrorCode::E002)
//!     .with_label(Span::new(40..62), "raster image here")
//!     .with_help("convert the image to outline paths");
//!
//! assert_eq!(diag.to_string(), "error[E002]: fragment embeds a raster image");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use severity::Severity;

/// A type alias for `Result<T, Diagnostic>`.
pub type Result<T> = std::result::Result<T, Diagnostic>;
