//! Positioning-scheme classification.
//!
//! Pure functions over the host's current style; nothing is cached, so a
//! style change between two calls is always observed.

use anchor_dom::NodeId;

use crate::host::LayoutHost;
use crate::style::{Display, PositionType};

/// The element's positioning scheme. Unknown, detached, and non-element
/// nodes are `static`.
#[must_use]
pub fn position_type<H: LayoutHost + ?Sized>(host: &H, node: NodeId) -> PositionType {
    if !host.tree().is_connected(node) {
        return PositionType::Static;
    }
    host.style(node).map_or(PositionType::Static, |style| style.position)
}

/// [§ 2](https://www.w3.org/TR/css-position-3/#absolute-position)
///
/// "absolutely positioned box: a box whose position value is absolute or
/// fixed."
#[must_use]
pub fn is_absolutely_positioned<H: LayoutHost + ?Sized>(host: &H, node: NodeId) -> bool {
    position_type(host, node).is_absolutely_positioned()
}

/// Whether the element itself has `display: none`.
#[must_use]
pub fn has_display_none<H: LayoutHost + ?Sized>(host: &H, node: NodeId) -> bool {
    host.display(node) == Some(Display::None)
}

/// Whether the element is rendered at all: connected, an element, not
/// skipped by the host, and neither it nor any ancestor has `display: none`.
#[must_use]
pub fn is_rendered<H: LayoutHost + ?Sized>(host: &H, node: NodeId) -> bool {
    let tree = host.tree();
    if tree.as_element(node).is_none() || !tree.is_connected(node) || host.is_skipped(node) {
        return false;
    }
    std::iter::once(node)
        .chain(tree.ancestors(node))
        .all(|id| !has_display_none(host, id))
}
