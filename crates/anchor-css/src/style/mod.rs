//! Resolved style snapshots.
//!
//! The polyfill reads style, it never cascades it. A host hands over one
//! [`ElementStyle`] per element reflecting the element's current resolved
//! values; nothing here is cached between queries.

/// `anchor-name`, `position-anchor`, and the `anchor()` function.
pub mod anchor;
/// The `display` property.
pub mod display;
/// Inline style declaration parsing.
pub mod parse;
/// The `position` property.
pub mod position;

pub use anchor::{AnchorFunction, AnchorName, AnchorSide, Axis, InsetSide, InsetValue};
pub use display::{Display, default_display_for_element};
pub use parse::parse_inline_style;
pub use position::PositionType;

/// The resolved values the polyfill reads for one element.
///
/// `None` fields mean "not specified"; the host (or [`ElementStyle::display_or`])
/// supplies the initial value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementStyle {
    /// [§ 2 'display'](https://www.w3.org/TR/css-display-3/#the-display-properties)
    ///
    /// None means use the element's default display value.
    pub display: Option<Display>,

    /// [§ 2.1 'position'](https://www.w3.org/TR/css-position-3/#position-property)
    pub position: PositionType,

    /// [§ 3.1 'top'](https://www.w3.org/TR/css-position-3/#inset-properties)
    pub top: InsetValue,
    /// [§ 3.1 'right'](https://www.w3.org/TR/css-position-3/#inset-properties)
    pub right: InsetValue,
    /// [§ 3.1 'bottom'](https://www.w3.org/TR/css-position-3/#inset-properties)
    pub bottom: InsetValue,
    /// [§ 3.1 'left'](https://www.w3.org/TR/css-position-3/#inset-properties)
    pub left: InsetValue,

    /// [§ 2.1 'anchor-name'](https://drafts.csswg.org/css-anchor-position-1/#name)
    ///
    /// "none | <dashed-ident>#". Empty means `none`.
    pub anchor_names: Vec<AnchorName>,

    /// [§ 2.3 'position-anchor'](https://drafts.csswg.org/css-anchor-position-1/#position-anchor)
    ///
    /// The default anchor used by `anchor()` functions without a name.
    pub position_anchor: Option<AnchorName>,

    /// `transform` is something other than `none`.
    pub has_transform: bool,
    /// `filter` is something other than `none`.
    pub has_filter: bool,
    /// `perspective` is something other than `none`.
    pub has_perspective: bool,
    /// `will-change` names `transform`, `filter`, or `perspective`.
    pub will_change_containing_block: bool,
    /// `contain` includes `layout` or `paint` (directly or via `strict`/`content`).
    pub contains_layout_or_paint: bool,
}

impl ElementStyle {
    /// The resolved `display`, falling back to `default` when unspecified.
    #[must_use]
    pub fn display_or(&self, default: Display) -> Display {
        self.display.unwrap_or(default)
    }

    /// The specified value of one inset property.
    #[must_use]
    pub const fn inset(&self, side: InsetSide) -> &InsetValue {
        match side {
            InsetSide::Top => &self.top,
            InsetSide::Right => &self.right,
            InsetSide::Bottom => &self.bottom,
            InsetSide::Left => &self.left,
        }
    }

    /// The inset properties whose value is an `anchor()` function, in
    /// `top right bottom left` order.
    pub fn anchor_insets(&self) -> impl Iterator<Item = (InsetSide, &AnchorFunction)> {
        InsetSide::ALL
            .into_iter()
            .filter_map(|side| self.inset(side).as_anchor().map(|f| (side, f)))
    }

    /// Whether the element carries `anchor-name: <name>`.
    #[must_use]
    pub fn has_anchor_name(&self, name: &AnchorName) -> bool {
        self.anchor_names.contains(name)
    }

    /// [§ 2.1 Transform rendering](https://www.w3.org/TR/css-transforms-1/#transform-rendering)
    ///
    /// "For elements whose layout is governed by the CSS box model, any value
    /// other than none for the transform property also causes the element to
    /// establish a containing block for all descendants."
    ///
    /// The same holds for `filter`, `perspective`, the matching
    /// `will-change` values, and layout/paint containment.
    #[must_use]
    pub const fn establishes_containing_block_for_all_descendants(&self) -> bool {
        self.has_transform
            || self.has_filter
            || self.has_perspective
            || self.will_change_containing_block
            || self.contains_layout_or_paint
    }
}
