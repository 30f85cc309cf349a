//! Isolation of the embedded vector markup inside a document.
//!
//! Source documents are loosely structured text (typically markdown) with a
//! single inline `<svg>` fragment somewhere inside. This module finds that
//! fragment and rejects fragments that embed raster images.

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    span::Span,
};

const ROOT_ELEMENT: &str = "svg";
const RASTER_ELEMENT: &str = "image";

/// A slice of a document holding vector markup.
///
/// The fragment remembers its byte offset inside the document so spans of
/// parsed nodes can be reported against the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Fragment<'a> {
    /// Create a fragment for `text` starting at byte `offset` of its document.
    pub fn new(text: &'a str, offset: usize) -> Self {
        Self { text, offset }
    }

    /// Treat a complete document as one fragment.
    pub fn whole(document: &'a str) -> Self {
        Self::new(document, 0)
    }

    /// The markup text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Byte offset of the fragment inside its document.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The span covered by the fragment inside its document.
    pub fn span(&self) -> Span {
        Span::new(self.offset..self.offset + self.text.len())
    }
}

/// Find the first `<svg>` ... `</svg>` fragment of a document.
///
/// The scan spans line breaks and accepts a namespace prefix on the root
/// element (`<svg:svg>`). The fragment ends at the first matching close tag.
///
/// # Errors
///
/// Returns an [`ErrorCode::E001`] diagnostic if the document has no root
/// element or the root element is never closed.
pub fn find_fragment(document: &str) -> Result<Fragment<'_>> {
    let Some((start, tag_name)) = element_starts(document, ROOT_ELEMENT).next() else {
        return Err(Diagnostic::error("no vector markup found in document")
            .with_code(ErrorCode::E001)
            .with_help("embed the shape as an inline `<svg>` ... `</svg>` block"));
    };

    let open_span = tag_span(document, start);
    let close_tag = format!("</{tag_name}");

    let close = document[start..]
        .match_indices(&close_tag)
        .map(|(close_rel, _)| start + close_rel)
        .find(|&close_start| {
            document[close_start + close_tag.len()..]
                .chars()
                .next()
                .is_some_and(|c| c == '>' || c.is_whitespace())
        })
        .and_then(|close_start| {
            document[close_start..]
                .find('>')
                .map(|gt| close_start + gt + 1)
        });

    match close {
        Some(end) => Ok(Fragment::new(&document[start..end], start)),
        None => Err(Diagnostic::error("vector markup is never closed")
            .with_code(ErrorCode::E001)
            .with_label(open_span, "markup opened here")
            .with_help(format!("add a closing `</{tag_name}>` tag"))),
    }
}

/// Reject fragments embedding raster images.
///
/// Raster content cannot be represented as outline geometry, so this is a
/// hard rejection rather than a degraded path.
///
/// # Errors
///
/// Returns an [`ErrorCode::E002`] diagnostic labelling the first `<image>`
/// element.
pub fn reject_raster(fragment: &Fragment<'_>) -> Result<()> {
    match element_starts(fragment.text(), RASTER_ELEMENT).next() {
        Some((start, _)) => {
            let span = tag_span(fragment.text(), start).shift(fragment.offset());
            Err(Diagnostic::error("vector markup embeds a raster image")
                .with_code(ErrorCode::E002)
                .with_label(span, "raster image here")
                .with_help("trace the image into `<path>` outlines or remove the document"))
        }
        None => Ok(()),
    }
}

/// Iterate over start tags of elements with the given local name.
///
/// Yields the byte offset of each `<` together with the qualified tag name.
fn element_starts<'a>(
    text: &'a str,
    local_name: &'a str,
) -> impl Iterator<Item = (usize, &'a str)> + 'a {
    text.match_indices('<').filter_map(move |(idx, _)| {
        let rest = &text[idx + 1..];
        let name_len = rest.find(|c: char| c.is_whitespace() || c == '>' || c == '/')?;
        let tag_name = &rest[..name_len];
        let local = tag_name.rsplit(':').next().unwrap_or(tag_name);
        (local == local_name).then_some((idx, tag_name))
    })
}

/// Span of the tag starting at `start`, up to and including its `>`.
fn tag_span(text: &str, start: usize) -> Span {
    let end = text[start..]
        .find('>')
        .map_or(text.len(), |gt| start + gt + 1);
    Span::new(start..end)
}
