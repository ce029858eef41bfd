//! Resolving `anchor()` insets against live geometry.
//!
//! [CSS Anchor Positioning § 3.2.1](https://drafts.csswg.org/css-anchor-position-1/#anchor-pos)
//!
//! "The anchor() function resolves to a <length>. It can only be used in
//! the inset properties."
//!
//! All geometry is read fresh on every call. The caller is responsible for
//! validating the anchor and for flushing layout beforehand.

use anchor_common::warning::warn_once;
use anchor_dom::NodeId;
use serde::Serialize;

use crate::geometry::Rect;
use crate::host::LayoutHost;
use crate::style::{AnchorFunction, AnchorSide, Axis, InsetSide};

/// Pixel values for the inset properties the polyfill writes. Properties
/// left as `None` are not touched on the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InsetRecord {
    /// `top`
    pub top: Option<f32>,
    /// `right`
    pub right: Option<f32>,
    /// `bottom`
    pub bottom: Option<f32>,
    /// `left`
    pub left: Option<f32>,
}

impl InsetRecord {
    /// The value for one side.
    #[must_use]
    pub const fn get(&self, side: InsetSide) -> Option<f32> {
        match side {
            InsetSide::Top => self.top,
            InsetSide::Right => self.right,
            InsetSide::Bottom => self.bottom,
            InsetSide::Left => self.left,
        }
    }

    /// Set the value for one side.
    pub const fn set(&mut self, side: InsetSide, value: Option<f32>) {
        match side {
            InsetSide::Top => self.top = value,
            InsetSide::Right => self.right = value,
            InsetSide::Bottom => self.bottom = value,
            InsetSide::Left => self.left = value,
        }
    }

    /// The sides that carry a value, in `top right bottom left` order.
    pub fn iter(&self) -> impl Iterator<Item = (InsetSide, f32)> + '_ {
        InsetSide::ALL
            .into_iter()
            .filter_map(|side| self.get(side).map(|value| (side, value)))
    }

    /// Whether no side carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// The entries of `self` whose value differs from `previous`.
    #[must_use]
    pub fn changed_since(&self, previous: &Self) -> Self {
        let mut changed = Self::default();
        for (side, value) in self.iter() {
            if previous.get(side).map(f32::to_bits) != Some(value.to_bits()) {
                changed.set(side, Some(value));
            }
        }
        changed
    }
}

/// One inset property bound to an `anchor()` function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsetBinding {
    /// The property being computed.
    pub side: InsetSide,
    /// The function it was declared with.
    pub function: AnchorFunction,
}

/// The box insets are resolved against: the target's offset parent's
/// padding box, or the viewport when there is no offset parent.
#[must_use]
pub fn reference_rect<H: LayoutHost + ?Sized>(host: &H, target: NodeId) -> Rect {
    host.offset_parent(target)
        .map_or_else(|| host.viewport(), |parent| host.client_rect(parent))
}

/// Resolve an `<anchor-side>` to a coordinate on the axis of `property`,
/// in the coordinate space of `anchor`.
///
/// Returns `None` when a physical side is used on the other axis
/// (`top: anchor(left)`), which makes the function invalid.
///
/// Logical sides assume `writing-mode: horizontal-tb; direction: ltr`.
#[must_use]
pub fn resolve_anchor_side(property: InsetSide, side: AnchorSide, anchor: &Rect) -> Option<f32> {
    let (start, size) = match property.axis() {
        Axis::Vertical => (anchor.y, anchor.height),
        Axis::Horizontal => (anchor.x, anchor.width),
    };
    let end = start + size;

    let on_axis = |axis: Axis, coordinate: f32| (property.axis() == axis).then_some(coordinate);

    match side {
        AnchorSide::Top => on_axis(Axis::Vertical, start),
        AnchorSide::Bottom => on_axis(Axis::Vertical, end),
        AnchorSide::Left => on_axis(Axis::Horizontal, start),
        AnchorSide::Right => on_axis(Axis::Horizontal, end),
        AnchorSide::Start | AnchorSide::SelfStart => Some(start),
        AnchorSide::End | AnchorSide::SelfEnd => Some(end),
        AnchorSide::Center => Some(size.mul_add(0.5, start)),
        AnchorSide::Percentage(fraction) => Some(size.mul_add(fraction, start)),
        // "Resolves to one of the anchor element's sides, depending on which
        // inset property it's used in." Inside is the property's own side.
        AnchorSide::Inside => Some(if property.is_far() { end } else { start }),
        AnchorSide::Outside => Some(if property.is_far() { start } else { end }),
    }
}

/// Turn a coordinate inside `reference` into the value of an inset
/// property: near insets measure from the reference's start edge, far
/// insets from its end edge.
#[must_use]
pub fn inset_from_coordinate(property: InsetSide, coordinate: f32, reference: &Rect) -> f32 {
    match property {
        InsetSide::Top | InsetSide::Left => coordinate,
        InsetSide::Bottom => reference.height - coordinate,
        InsetSide::Right => reference.width - coordinate,
    }
}

/// Compute the requested insets of `target` from the current box of
/// `anchor`.
///
/// `anchor` must already be a valid anchor for `target`; this function
/// does not check. Bindings that cannot be resolved use their fallback, or
/// are left out of the record when they have none.
#[must_use]
pub fn compute_insets<H: LayoutHost + ?Sized>(
    host: &H,
    anchor: NodeId,
    target: NodeId,
    bindings: &[InsetBinding],
) -> InsetRecord {
    let reference = reference_rect(host, target);
    let anchor_rect = host.bounding_rect(anchor).relative_to(&reference);

    let mut record = InsetRecord::default();
    for binding in bindings {
        let value = resolve_anchor_side(binding.side, binding.function.side, &anchor_rect)
            .map(|coordinate| inset_from_coordinate(binding.side, coordinate, &reference))
            .or_else(|| {
                warn_once(
                    "anchor",
                    &format!(
                        "anchor side {:?} cannot be used in '{}'",
                        binding.function.side, binding.side
                    ),
                );
                binding.function.fallback
            });
        record.set(binding.side, value);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_sides_resolve_on_their_axis_only() {
        let anchor = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(resolve_anchor_side(InsetSide::Top, AnchorSide::Bottom, &anchor), Some(60.0));
        assert_eq!(resolve_anchor_side(InsetSide::Right, AnchorSide::Left, &anchor), Some(10.0));
        assert_eq!(resolve_anchor_side(InsetSide::Top, AnchorSide::Left, &anchor), None);
        assert_eq!(resolve_anchor_side(InsetSide::Left, AnchorSide::Bottom, &anchor), None);
    }

    #[test]
    fn test_logical_and_relative_sides() {
        let anchor = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(resolve_anchor_side(InsetSide::Left, AnchorSide::Center, &anchor), Some(25.0));
        assert_eq!(
            resolve_anchor_side(InsetSide::Top, AnchorSide::Percentage(0.25), &anchor),
            Some(30.0)
        );
        assert_eq!(resolve_anchor_side(InsetSide::Bottom, AnchorSide::Inside, &anchor), Some(60.0));
        assert_eq!(resolve_anchor_side(InsetSide::Bottom, AnchorSide::Outside, &anchor), Some(20.0));
        assert_eq!(resolve_anchor_side(InsetSide::Left, AnchorSide::End, &anchor), Some(40.0));
    }

    #[test]
    fn test_far_insets_measure_from_reference_end() {
        let reference = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(inset_from_coordinate(InsetSide::Right, 50.0, &reference), 150.0);
        assert_eq!(inset_from_coordinate(InsetSide::Bottom, 30.0, &reference), 70.0);
        assert_eq!(inset_from_coordinate(InsetSide::Top, 30.0, &reference), 30.0);
    }

    #[test]
    fn test_changed_since_keeps_only_differences() {
        let previous = InsetRecord {
            top: Some(10.0),
            right: Some(150.0),
            ..InsetRecord::default()
        };
        let current = InsetRecord {
            top: Some(10.0),
            right: Some(120.0),
            ..InsetRecord::default()
        };
        let changed = current.changed_since(&previous);
        assert_eq!(changed.top, None);
        assert_eq!(changed.right, Some(120.0));
        assert!(current.changed_since(&current).is_empty());
    }
}
