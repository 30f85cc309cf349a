//! Pattern-matching scanner for loosely structured markup.
//!
//! The scanner looks for start tags (`<name attr="value" ...>`) anywhere in
//! the text and reads their attributes without checking nesting or closing
//! tags. Predefined entities in attribute values are decoded; a value with a
//! broken entity is kept as written. Whatever it cannot read is skipped one
//! character at a time, so it never fails.

use log::debug;
use quick_xml::escape::unescape;
use winnow::{
    Parser as _,
    ascii::multispace0,
    combinator::{alt, delimited, opt, preceded, repeat},
    error::ModalResult,
    stream::{LocatingSlice, Location, Stream},
    token::{take_till, take_while},
};

use crate::{
    error::Result,
    extract::Fragment,
    markup::{MarkupNode, MarkupParser},
    span::Span,
};

type Input<'a> = LocatingSlice<&'a str>;

/// A start tag as matched in the text.
#[derive(Debug)]
struct RawTag<'a> {
    name: &'a str,
    attributes: Vec<(&'a str, &'a str)>,
    span: Span,
}

impl RawTag<'_> {
    fn into_node(self, offset: usize) -> MarkupNode {
        let local_name = self.name.rsplit(':').next().unwrap_or(self.name);
        let attributes = self
            .attributes
            .into_iter()
            .map(|(key, value)| (key.to_string(), decode_entities(value)))
            .collect();
        MarkupNode::new(local_name, attributes, self.span.shift(offset))
    }
}

fn decode_entities(value: &str) -> String {
    unescape(value).map_or_else(|_| value.to_string(), |decoded| decoded.into_owned())
}

/// Parse an element or attribute name
pub(crate) fn name<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.')
    })
    .parse_next(input)
}

/// Parse a single- or double-quoted attribute value, which may span lines
pub(crate) fn quoted_value<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    alt((
        delimited('"', take_till(0.., '"'), '"'),
        delimited('\'', take_till(0.., '\''), '\''),
    ))
    .parse_next(input)
}

/// Parse an unquoted attribute value
fn unquoted_value<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    take_while(1.., |c: char| {
        !c.is_whitespace() && !matches!(c, '>' | '"' | '\'')
    })
    .parse_next(input)
}

/// Parse `name`, `name=value` or `name = "value"`
fn attribute<'a>(input: &mut Input<'a>) -> ModalResult<(&'a str, &'a str)> {
    (
        preceded(multispace0, name),
        opt(preceded(
            (multispace0, '=', multispace0),
            alt((quoted_value, unquoted_value)),
        )),
    )
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .parse_next(input)
}

/// Parse a start tag, tolerating anything unreadable before its `>`
fn start_tag<'a>(input: &mut Input<'a>) -> ModalResult<RawTag<'a>> {
    let start = input.current_token_start();

    '<'.parse_next(input)?;
    let name = name.parse_next(input)?;
    let attributes: Vec<(&str, &str)> = repeat(0.., attribute).parse_next(input)?;
    take_till(0.., '>').parse_next(input)?;
    opt('>').parse_next(input)?;

    let end = input.current_token_start();
    Ok(RawTag {
        name,
        attributes,
        span: Span::new(start..end),
    })
}

/// Collect every start tag of `text` in document order.
fn scan_start_tags(text: &str) -> Vec<RawTag<'_>> {
    let mut input = LocatingSlice::new(text);
    let mut tags = Vec::new();

    loop {
        let skipped: ModalResult<&str> = take_till(0.., '<').parse_next(&mut input);
        if skipped.is_err() || input.is_empty() {
            break;
        }

        let checkpoint = input.checkpoint();
        match start_tag(&mut input) {
            Ok(tag) => tags.push(tag),
            Err(_) => {
                // Closing tags, comments and stray `<` are not start tags
                input.reset(&checkpoint);
                input.next_token();
            }
        }
    }

    tags
}

/// [`MarkupParser`] that matches tags and attributes directly in the text.
///
/// The first `svg` element becomes the root and every other element, in
/// document order, becomes one of its children. Without an `svg` element the
/// root is synthesized with no attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternScanner;

impl MarkupParser for PatternScanner {
    fn parse(&self, fragment: &Fragment<'_>) -> Result<MarkupNode> {
        let mut nodes: Vec<MarkupNode> = scan_start_tags(fragment.text())
            .into_iter()
            .map(|tag| tag.into_node(fragment.offset()))
            .collect();

        let mut root = match nodes.iter().position(|node| node.name() == "svg") {
            Some(index) => nodes.remove(index),
            None => MarkupNode::new("svg", Vec::new(), fragment.span()),
        };

        for node in nodes {
            root.push_child(node);
        }

        debug!(elements = root.children().len(); "Pattern scan complete");
        Ok(root)
    }
}
