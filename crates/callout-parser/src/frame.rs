//! Normalization of a fragment's declared bounds into a [`ShapeFrame`].
//!
//! Bounds come from the root element. The `viewBox` rectangle is preferred;
//! a missing or zero `viewBox` dimension falls back to the matching `width`
//! or `height` attribute, with any unit suffix (`px`, `pt`, ...) removed.
//! The center offset is always half the size. A non-zero `viewBox` origin is
//! not applied.

use callout_core::geometry::ShapeFrame;
use log::debug;
use winnow::{
    Parser as _,
    ascii::{float, multispace0, multispace1},
    combinator::{alt, delimited, eof, separated, terminated},
    error::ModalResult,
    token::take_while,
};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    markup::MarkupNode,
};

/// The four numbers of a `viewBox` attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ViewBox {
    min_x: f64,
    min_y: f64,
    width: f64,
    height: f64,
}

/// Derive the frame of the shape whose root element is `root`.
///
/// # Errors
///
/// Returns an [`ErrorCode::E300`] diagnostic when no size can be found, or
/// when the size is zero, negative or not finite.
pub fn normalize(root: &MarkupNode) -> Result<ShapeFrame> {
    let view_box = root.attribute("viewBox").and_then(|raw| {
        let parsed = parse_view_box(raw);
        if parsed.is_none() {
            debug!(view_box = raw; "Ignoring malformed viewBox");
        }
        parsed
    });

    if let Some(view_box) = view_box {
        if view_box.min_x != 0.0 || view_box.min_y != 0.0 {
            debug!(
                min_x = view_box.min_x,
                min_y = view_box.min_y;
                "Ignoring non-zero viewBox origin",
            );
        }
    }

    let width = resolve(view_box.map(|vb| vb.width), root.attribute("width"));
    let height = resolve(view_box.map(|vb| vb.height), root.attribute("height"));

    let (Some(width), Some(height)) = (width, height) else {
        return Err(Diagnostic::error("markup declares no bounds")
            .with_code(ErrorCode::E300)
            .with_label(root.span(), "no usable `viewBox`, `width` or `height` here")
            .with_help("declare `viewBox=\"0 0 <width> <height>\"` on the root element"));
    };

    let frame = ShapeFrame::from_size(width, height);
    if frame.is_degenerate() {
        return Err(Diagnostic::error(format!(
            "frame size {width} x {height} is degenerate"
        ))
        .with_code(ErrorCode::E300)
        .with_label(root.span(), "bounds declared here")
        .with_help("width and height must both be positive"));
    }

    Ok(frame)
}

/// Pick one dimension: the `viewBox` value unless it is missing or zero,
/// then the attribute, then the zero `viewBox` value.
fn resolve(from_view_box: Option<f64>, attribute: Option<&str>) -> Option<f64> {
    match from_view_box {
        Some(value) if value != 0.0 => Some(value),
        _ => attribute.and_then(parse_length).or(from_view_box),
    }
}

fn parse_view_box(raw: &str) -> Option<ViewBox> {
    let mut input = raw;
    let parsed: ModalResult<Vec<f64>> = delimited(
        multispace0,
        separated(4, float::<_, f64, _>, separator),
        (multispace0, eof),
    )
    .parse_next(&mut input);
    let numbers = parsed.ok()?;

    Some(ViewBox {
        min_x: numbers[0],
        min_y: numbers[1],
        width: numbers[2],
        height: numbers[3],
    })
}

/// Whitespace and/or a single comma between `viewBox` numbers
fn separator(input: &mut &str) -> ModalResult<()> {
    alt(((multispace0, ',', multispace0).void(), multispace1.void())).parse_next(input)
}

/// Parse a length such as `100`, `12.5px` or ` 3em `
fn parse_length(raw: &str) -> Option<f64> {
    let mut input = raw;
    let number: ModalResult<&str> = terminated(
        delimited(
            multispace0,
            take_while(1.., |c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | '+')),
            take_while(0.., char::is_alphabetic),
        ),
        (multispace0, eof),
    )
    .parse_next(&mut input);
    number.ok()?.parse().ok()
}
