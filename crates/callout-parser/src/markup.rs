//! Markup trees and the parsers that build them.
//!
//! A fragment is turned into a [`MarkupNode`] tree by a [`MarkupParser`].
//! Two interchangeable implementations exist:
//!
//! - [`StructuralParser`] reads the fragment as XML and fails on malformed
//!   structure.
//! - [`PatternScanner`] matches start tags and attributes directly in the
//!   text, never fails, and yields a flat tree with every element found after
//!   the root as a child of the root.
//!
//! [`ParseStrategy`] selects between them (or chains them) in one place.

mod scanner;
mod structural;

pub use scanner::PatternScanner;
pub use structural::StructuralParser;

use std::borrow::Cow;

use log::warn;
use serde::Deserialize;
use winnow::{
    Parser as _,
    ascii::multispace0,
    combinator::opt,
    error::ModalResult,
    stream::{LocatingSlice, Location},
    token::literal,
};

use crate::{error::Result, extract::Fragment, span::Span};

/// An element of a parsed markup fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<MarkupNode>,
    span: Span,
}

impl MarkupNode {
    /// Create a childless node.
    ///
    /// # Arguments
    ///
    /// * `name` - Local element name, without namespace prefix.
    /// * `attributes` - Attributes in source order.
    /// * `span` - Location of the start tag in the document.
    pub fn new(name: impl Into<String>, attributes: Vec<(String, String)>, span: Span) -> Self {
        Self {
            name: name.into(),
            attributes,
            children: Vec::new(),
            span,
        }
    }

    /// Local element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn children(&self) -> &[MarkupNode] {
        &self.children
    }

    /// Location of the element's start tag in the document.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn push_child(&mut self, child: MarkupNode) {
        self.children.push(child);
    }

    /// Iterate over this node and all its descendants, depth-first in
    /// document order (pre-order).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`MarkupNode::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a MarkupNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a MarkupNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Turns a markup fragment into a node tree.
pub trait MarkupParser {
    /// Parse `fragment` and return its root element.
    ///
    /// # Errors
    ///
    /// Returns a diagnostic if the fragment cannot be turned into a tree.
    fn parse(&self, fragment: &Fragment<'_>) -> Result<MarkupNode>;
}

/// Selects which [`MarkupParser`] builds the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseStrategy {
    /// Well-formed XML only; malformed fragments fail.
    #[default]
    Structural,
    /// Direct pattern matching; never fails on structure.
    Permissive,
    /// Structural parsing, retried with the pattern scanner when it fails.
    StructuralWithFallback,
}

impl MarkupParser for ParseStrategy {
    fn parse(&self, fragment: &Fragment<'_>) -> Result<MarkupNode> {
        match self {
            ParseStrategy::Structural => StructuralParser.parse(fragment),
            ParseStrategy::Permissive => PatternScanner.parse(fragment),
            ParseStrategy::StructuralWithFallback => {
                StructuralParser.parse(fragment).or_else(|diag| {
                    let diag = diag.into_warning();
                    warn!(diagnostic:% = diag; "Structural parse failed, falling back to pattern scanning");
                    PatternScanner.parse(fragment)
                })
            }
        }
    }
}

/// Blank out namespace declarations (`xmlns="..."`, `xmlns:xlink="..."`).
///
/// Declarations are replaced by spaces of the same byte length so offsets
/// into the returned text still match the original.
pub(crate) fn strip_namespace_declarations(text: &str) -> Cow<'_, str> {
    let declarations: Vec<_> = text
        .match_indices("xmlns")
        .filter(|(idx, _)| text[..*idx].ends_with(char::is_whitespace))
        .filter_map(|(idx, _)| declaration_len(&text[idx..]).map(|len| idx..idx + len))
        .collect();

    if declarations.is_empty() {
        return Cow::Borrowed(text);
    }

    let mut stripped = text.to_string();
    for range in declarations {
        let blank = " ".repeat(range.len());
        stripped.replace_range(range, &blank);
    }
    Cow::Owned(stripped)
}

/// Byte length of the namespace declaration at the start of `text`.
fn declaration_len(text: &str) -> Option<usize> {
    fn declaration(input: &mut LocatingSlice<&str>) -> ModalResult<usize> {
        (
            literal("xmlns"),
            opt((':', scanner::name)),
            multispace0,
            '=',
            multispace0,
            scanner::quoted_value,
        )
            .parse_next(input)?;
        Ok(input.current_token_start())
    }

    declaration(&mut LocatingSlice::new(text)).ok()
}
