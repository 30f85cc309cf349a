//! Geometric primitives for callout shapes.
//!
//! A callout shape is positioned and scaled by the consuming renderer using a
//! [`ShapeFrame`]: the size of its bounding box plus the offset of the point
//! the renderer treats as the shape's center.
//!
//! # Coordinate System
//!
//! Frames use the SVG user coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! The center offset is measured from the top-left corner of the bounding box.

use serde::Deserialize;

/// The bounding frame of a callout shape.
///
/// Frames produced from source documents always carry a center offset of half
/// the width and half the height. Hand-authored baseline frames may place the
/// center elsewhere (for example above a tail), so the offset is stored rather
/// than derived.
///
/// # Examples
///
/// ```
/// # use callout_core::geometry::ShapeFrame;
/// let frame = ShapeFrame::from_size(100.0, 50.0);
///
/// assert_eq!(frame.width(), 100.0);
/// assert_eq!(frame.height(), 50.0);
/// assert_eq!(frame.center_offset_x(), 50.0);
/// assert_eq!(frame.center_offset_y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ShapeFrame {
    width: f64,
    height: f64,
    center_offset_x: f64,
    center_offset_y: f64,
}

impl ShapeFrame {
    /// Creates a frame with an explicit center offset.
    pub const fn new(width: f64, height: f64, center_offset_x: f64, center_offset_y: f64) -> Self {
        Self {
            width,
            height,
            center_offset_x,
            center_offset_y,
        }
    }

    /// Creates a frame centered on the middle of its bounding box.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(width, height, width / 2.0, height / 2.0)
    }

    /// Returns the width of the bounding box
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height of the bounding box
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns the horizontal offset of the center from the left edge
    pub fn center_offset_x(self) -> f64 {
        self.center_offset_x
    }

    /// Returns the vertical offset of the center from the top edge
    pub fn center_offset_y(self) -> f64 {
        self.center_offset_y
    }

    /// Returns true if the frame cannot be used to place a shape.
    ///
    /// A frame is degenerate when either dimension is zero, negative or not a
    /// finite number.
    pub fn is_degenerate(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn dimension_strategy() -> impl Strategy<Value = f64> {
        0.001f64..10_000.0
    }

    /// Frames built from a size are centered exactly on the middle of the box.
    fn check_offset_is_half_size(width: f64, height: f64) -> Result<(), TestCaseError> {
        let frame = ShapeFrame::from_size(width, height);

        prop_assert_eq!(frame.center_offset_x(), width / 2.0);
        prop_assert_eq!(frame.center_offset_y(), height / 2.0);
        prop_assert!(approx_eq!(f64, frame.center_offset_x() * 2.0, width));
        prop_assert!(approx_eq!(f64, frame.center_offset_y() * 2.0, height));
        Ok(())
    }

    /// Positive finite sizes never produce a degenerate frame.
    fn check_positive_size_is_usable(width: f64, height: f64) -> Result<(), TestCaseError> {
        prop_assert!(!ShapeFrame::from_size(width, height).is_degenerate());
        Ok(())
    }

    proptest! {
        #[test]
        fn offset_is_half_size(w in dimension_strategy(), h in dimension_strategy()) {
            check_offset_is_half_size(w, h)?;
        }

        #[test]
        fn positive_size_is_usable(w in dimension_strategy(), h in dimension_strategy()) {
            check_positive_size_is_usable(w, h)?;
        }
    }
}
