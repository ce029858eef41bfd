//! Geometry read from the host.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)

use serde::{Deserialize, Serialize};

/// A rectangle positioned in 2D space.
///
/// Rectangles coming from the host are in viewport coordinates. A rectangle
/// of a detached element is the zero rectangle, which is a legitimate input
/// everywhere in this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its origin and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Express this rectangle in the coordinate space whose origin is the
    /// top-left corner of `reference`.
    #[must_use]
    pub fn relative_to(&self, reference: &Self) -> Self {
        Self {
            x: self.x - reference.x,
            y: self.y - reference.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Shrink the rectangle by the given edge sizes.
    ///
    /// Used to go from a border box to a padding box. Sizes never become
    /// negative.
    #[must_use]
    pub fn deflate(&self, edges: &EdgeSizes) -> Self {
        Self {
            x: self.x + edges.left,
            y: self.y + edges.top,
            width: (self.width - edges.left - edges.right).max(0.0),
            height: (self.height - edges.top - edges.bottom).max(0.0),
        }
    }
}

/// Edge sizes for padding, border, or margin.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeSizes {
    /// Top edge size.
    pub top: f32,
    /// Right edge size.
    pub right: f32,
    /// Bottom edge size.
    pub bottom: f32,
    /// Left edge size.
    pub left: f32,
}

impl EdgeSizes {
    /// The same size on all four edges.
    #[must_use]
    pub const fn uniform(size: f32) -> Self {
        Self {
            top: size,
            right: size,
            bottom: size,
            left: size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_to_moves_origin_only() {
        let anchor = Rect::new(30.0, 40.0, 10.0, 20.0);
        let reference = Rect::new(10.0, 15.0, 200.0, 100.0);
        assert_eq!(anchor.relative_to(&reference), Rect::new(20.0, 25.0, 10.0, 20.0));
    }

    #[test]
    fn test_deflate_clamps_to_zero() {
        let rect = Rect::new(0.0, 0.0, 4.0, 4.0);
        let deflated = rect.deflate(&EdgeSizes::uniform(3.0));
        assert_eq!(deflated, Rect::new(3.0, 3.0, 0.0, 0.0));
    }
}
