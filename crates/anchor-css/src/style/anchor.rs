//! Anchor names, inset properties, and the `anchor()` function.
//!
//! [CSS Anchor Positioning § 2](https://drafts.csswg.org/css-anchor-position-1/#determining)

use std::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// [§ 2.1 Creating an Anchor: the anchor-name property](https://drafts.csswg.org/css-anchor-position-1/#name)
///
/// An anchor name is a `<dashed-ident>`, stored with its leading `--`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AnchorName(String);

impl AnchorName {
    /// Create an anchor name, returning `None` unless `name` is a
    /// `<dashed-ident>` (starts with `--` and has at least one more character).
    #[must_use]
    pub fn new(name: &str) -> Option<Self> {
        (name.len() > 2 && name.starts_with("--")).then(|| Self(name.to_string()))
    }

    /// The name including its leading `--`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnchorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// [§ 9.3.2 Box offsets](https://www.w3.org/TR/CSS2/visuren.html#position-props)
///
/// One of the four physical inset properties.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum InsetSide {
    /// `top`
    Top,
    /// `right`
    Right,
    /// `bottom`
    Bottom,
    /// `left`
    Left,
}

/// The physical axis an inset property (or a physical anchor side) lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The x axis: `left` and `right`.
    Horizontal,
    /// The y axis: `top` and `bottom`.
    Vertical,
}

impl InsetSide {
    /// All four sides in the order `top right bottom left`.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The axis this inset offsets along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// Whether this inset measures from the far edge of the containing
    /// block (`right`, `bottom`) rather than the near edge.
    #[must_use]
    pub const fn is_far(self) -> bool {
        matches!(self, Self::Right | Self::Bottom)
    }
}

/// [§ 3.2.1 The anchor() function](https://drafts.csswg.org/css-anchor-position-1/#anchor-pos)
///
/// `<anchor-side> = inside | outside | top | left | right | bottom | start |
/// end | self-start | self-end | <percentage> | center`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AnchorSide {
    /// The anchor's top edge.
    Top,
    /// The anchor's right edge.
    Right,
    /// The anchor's bottom edge.
    Bottom,
    /// The anchor's left edge.
    Left,
    /// The start edge of the inset property's axis.
    Start,
    /// The end edge of the inset property's axis.
    End,
    /// The start edge in the target's own writing mode.
    SelfStart,
    /// The end edge in the target's own writing mode.
    SelfEnd,
    /// "Resolves to one of the anchor element's sides, depending on which
    /// inset property it's used in": the same side as the property.
    Inside,
    /// The opposite side from the inset property.
    Outside,
    /// Halfway between the start and end edges.
    Center,
    /// A position between the start (0.0) and end (1.0) edges.
    Percentage(f32),
}

impl AnchorSide {
    /// Parse an `<anchor-side>` keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword.to_ascii_lowercase().as_str() {
            "top" => Self::Top,
            "right" => Self::Right,
            "bottom" => Self::Bottom,
            "left" => Self::Left,
            "start" => Self::Start,
            "end" => Self::End,
            "self-start" => Self::SelfStart,
            "self-end" => Self::SelfEnd,
            "inside" => Self::Inside,
            "outside" => Self::Outside,
            "center" => Self::Center,
            _ => return None,
        })
    }
}

/// A parsed `anchor()` function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnchorFunction {
    /// The `<anchor-name>` argument. `None` means the target's default
    /// anchor (its `position-anchor`).
    pub name: Option<AnchorName>,
    /// Which edge (or point) of the anchor box to resolve to.
    pub side: AnchorSide,
    /// The fallback length in pixels, used when the function cannot be
    /// resolved.
    pub fallback: Option<f32>,
}

/// A specified value of `top`, `right`, `bottom`, or `left`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum InsetValue {
    /// `auto`
    #[default]
    Auto,
    /// A length in CSS pixels.
    Px(f32),
    /// An `anchor()` function awaiting resolution.
    Anchor(AnchorFunction),
}

impl InsetValue {
    /// The `anchor()` function of this value, if it is one.
    #[must_use]
    pub const fn as_anchor(&self) -> Option<&AnchorFunction> {
        match self {
            Self::Anchor(function) => Some(function),
            _ => None,
        }
    }
}
