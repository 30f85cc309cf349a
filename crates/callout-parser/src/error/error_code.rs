//! Error codes for the callout diagnostic system.
//!
//! Error codes are organized by pipeline stage:
//! - `E0xx` - Markup extraction errors
//! - `E1xx` - Tree parsing errors
//! - `E2xx` - Path collection errors
//! - `E3xx` - Frame normalization errors

use std::fmt;

/// Error codes for categorizing extraction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Extraction Errors (E0xx)
    // =========================================================================
    /// No markup found.
    ///
    /// The document contains no `<svg>` ... `</svg>` fragment.
    E001,

    /// Unsupported content.
    ///
    /// The fragment embeds a raster `<image>`, which cannot be represented as
    /// outline geometry.
    E002,

    // =========================================================================
    // Parser Errors (E1xx)
    // =========================================================================
    /// Malformed markup.
    ///
    /// The fragment is not well-formed: a tag, attribute or entity could not
    /// be read, or closing tags do not match.
    E100,

    /// Unclosed element.
    ///
    /// The fragment ended while an element was still open.
    E101,

    // =========================================================================
    // Path Errors (E2xx)
    // =========================================================================
    /// No path data.
    ///
    /// The markup parsed but contains no `<path>` element with a `d` attribute.
    E200,

    // =========================================================================
    // Frame Errors (E3xx)
    // =========================================================================
    /// Degenerate frame.
    ///
    /// Neither a usable `viewBox` nor `width`/`height` attributes declare a
    /// positive size.
    E300,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E300 => "E300",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "no markup found",
            ErrorCode::E002 => "unsupported content",
            ErrorCode::E100 => "malformed markup",
            ErrorCode::E101 => "unclosed element",
            ErrorCode::E200 => "no path data",
            ErrorCode::E300 => "degenerate frame",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
