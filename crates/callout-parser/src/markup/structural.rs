//! Well-formed XML parsing of markup fragments.

use log::debug;
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    extract::Fragment,
    markup::{MarkupNode, MarkupParser, strip_namespace_declarations},
    span::Span,
};

/// [`MarkupParser`] that requires the fragment to be well-formed XML.
///
/// Namespace declarations are removed before parsing and element names are
/// matched on their local part, so prefixed and unprefixed documents produce
/// the same tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralParser;

impl MarkupParser for StructuralParser {
    fn parse(&self, fragment: &Fragment<'_>) -> Result<MarkupNode> {
        let text = strip_namespace_declarations(fragment.text());
        let offset = fragment.offset();
        let mut reader = Reader::from_str(&text);

        let mut stack: Vec<MarkupNode> = Vec::new();
        let mut root: Option<MarkupNode> = None;

        loop {
            let before = reader.buffer_position();
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    let at = Span::at(offset + reader.buffer_position());
                    return Err(xml_error(&err, at, stack.last()));
                }
            };
            let after = reader.buffer_position();

            match event {
                Event::Start(start) => {
                    let span = tag_span(&text, before, after).shift(offset);
                    if stack.is_empty() && root.is_some() {
                        return Err(extra_root(span));
                    }
                    stack.push(element(&start, span)?);
                }
                Event::Empty(start) => {
                    let span = tag_span(&text, before, after).shift(offset);
                    let node = element(&start, span)?;
                    attach(node, &mut stack, &mut root)?;
                }
                Event::End(_) => {
                    let Some(node) = stack.pop() else {
                        return Err(Diagnostic::error("closing tag without a matching opening tag")
                            .with_code(ErrorCode::E100)
                            .with_label(tag_span(&text, before, after).shift(offset), "unexpected closing tag"));
                    };
                    attach(node, &mut stack, &mut root)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(Diagnostic::error(format!("element `<{}>` is never closed", open.name()))
                .with_code(ErrorCode::E101)
                .with_label(
                    Span::at(offset + text.len()),
                    format!("expected `</{}>` here", open.name()),
                )
                .with_secondary_label(open.span(), "opened here"));
        }

        let root = root.ok_or_else(|| {
            Diagnostic::error("markup contains no elements")
                .with_code(ErrorCode::E100)
                .with_label(fragment.span(), "no element found here")
        })?;

        debug!(root = root.name(), elements = root.descendants().count(); "Structural parse complete");
        Ok(root)
    }
}

/// Add a finished element to its parent, or make it the root.
fn attach(node: MarkupNode, stack: &mut [MarkupNode], root: &mut Option<MarkupNode>) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(extra_root(node.span()));
    }
    *root = Some(node);
    Ok(())
}

fn element(start: &BytesStart<'_>, span: Span) -> Result<MarkupNode> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|err| malformed(format!("malformed attribute: {err}"), span))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| malformed(format!("malformed attribute value: {err}"), span))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(MarkupNode::new(name, attributes, span))
}

/// Span of the tag read between two reader positions, without leading text.
fn tag_span(text: &str, before: usize, after: usize) -> Span {
    let start = text
        .get(before..after)
        .and_then(|read| read.find('<'))
        .map_or(before, |index| before + index);
    Span::new(start..after)
}

fn malformed(message: String, span: Span) -> Diagnostic {
    Diagnostic::error(message)
        .with_code(ErrorCode::E100)
        .with_label(span, "in this element")
}

fn extra_root(span: Span) -> Diagnostic {
    Diagnostic::error("markup has more than one root element")
        .with_code(ErrorCode::E100)
        .with_label(span, "second root element")
}

fn xml_error(err: &quick_xml::Error, at: Span, open: Option<&MarkupNode>) -> Diagnostic {
    match err {
        quick_xml::Error::EndEventMismatch { expected, found } => {
            let diag = Diagnostic::error(format!(
                "closing tag `</{found}>` does not match `<{expected}>`"
            ))
            .with_code(ErrorCode::E100)
            .with_label(at, "mismatched closing tag");
            match open {
                Some(open) => diag.with_secondary_label(open.span(), "opened here"),
                None => diag,
            }
        }
        err => Diagnostic::error(format!("malformed markup: {err}"))
            .with_code(ErrorCode::E100)
            .with_label(at, "parsing stopped here"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<MarkupNode> {
        StructuralParser.parse(&Fragment::whole(text))
    }

    #[test]
    fn test_parse_simple_fragment() {
        let root = parse(r#"<svg viewBox="0 0 100 50"><path d="M0,0 L100,50"/></svg>"#).unwrap();

        assert_eq!(root.name(), "svg");
        assert_eq!(root.attribute("viewBox"), Some("0 0 100 50"));
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].name(), "path");
        assert_eq!(root.children()[0].attribute("d"), Some("M0,0 L100,50"));
    }

    #[test]
    fn test_parse_nested_groups_in_document_order() {
        let root = parse(
            r#"<svg><g><path d="a"/><g><path d="b"/></g></g><path d="c"/></svg>"#,
        )
        .unwrap();

        let data: Vec<_> = root
            .descendants()
            .filter_map(|node| node.attribute("d"))
            .collect();
        assert_eq!(data, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_with_namespaces() {
        let root = parse(concat!(
            r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg" "#,
            r#"xmlns:xlink="http://www.w3.org/1999/xlink">"#,
            r#"<svg:path d="M0,0Z"/></svg:svg>"#,
        ))
        .unwrap();

        assert_eq!(root.name(), "svg");
        assert!(root.attributes().is_empty());
        assert_eq!(root.children()[0].name(), "path");
    }

    #[test]
    fn test_parse_unescapes_attribute_values() {
        let root = parse(r#"<svg><path d="M0,0 &amp; Z"/></svg>"#).unwrap();

        assert_eq!(root.children()[0].attribute("d"), Some("M0,0 & Z"));
    }

    #[test]
    fn test_parse_element_spans() {
        let text = r#"<svg>
  <path d="M0,0"/>
</svg>"#;
        let root = parse(text).unwrap();

        assert_eq!(root.span(), Span::new(0..5));
        assert_eq!(&text[root.children()[0].span().range()], r#"<path d="M0,0"/>"#);
    }

    #[test]
    fn test_parse_mismatched_close_tag() {
        let diag = parse("<svg><g></svg>").unwrap_err();

        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert!(diag.severity().is_error());
    }

    #[test]
    fn test_parse_unclosed_element() {
        let diag = parse(r#"<svg><path d="M0,0">"#).unwrap_err();

        assert_eq!(diag.code(), Some(ErrorCode::E101));
        assert!(diag.message().contains("<path>"));
        assert_eq!(diag.labels().len(), 2);
    }

    #[test]
    fn test_parse_multiple_roots() {
        let diag = parse("<svg/><svg/>").unwrap_err();

        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert!(diag.message().contains("more than one root"));
    }

    #[test]
    fn test_parse_empty_fragment() {
        let diag = parse("   ").unwrap_err();

        assert_eq!(diag.code(), Some(ErrorCode::E100));
    }
}
