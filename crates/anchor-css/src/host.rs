//! The capabilities the polyfill consumes from its host.
//!
//! The host owns the document, computes style, and performs layout. The
//! polyfill only borrows it through these traits for the length of one
//! computation, and refers to elements by [`NodeId`] between computations.

use anchor_dom::{DomTree, NodeId};

use crate::geometry::Rect;
use crate::style::{ElementStyle, InsetSide};

/// Read access to tree, style, and geometry, plus the one write the
/// polyfill performs: inline inset values on targets.
pub trait LayoutHost {
    /// The live document tree.
    fn tree(&self) -> &DomTree;

    /// The element's resolved style, or `None` for non-elements and nodes
    /// the host knows nothing about (treated as `position: static`, no box).
    fn style(&self, node: NodeId) -> Option<&ElementStyle>;

    /// The element's resolved `display`, including the user-agent default
    /// when the author did not set one. `None` for non-elements.
    fn display(&self, node: NodeId) -> Option<crate::style::Display>;

    /// Whether `node` establishes a containing block for absolutely
    /// positioned descendants for a reason other than its `position`
    /// (transforms, filters, containment, ...).
    ///
    /// The set of properties that do this differs between engines, so hosts
    /// may override it. The default reads the flags on the style snapshot.
    fn establishes_containing_block(&self, node: NodeId) -> bool {
        self.style(node)
            .is_some_and(ElementStyle::establishes_containing_block_for_all_descendants)
    }

    /// Whether the host skips rendering this element for reasons the style
    /// snapshot does not show (e.g. `content-visibility`).
    fn is_skipped(&self, _node: NodeId) -> bool {
        false
    }

    /// The element's border box in viewport coordinates. Detached or
    /// box-less elements report the zero rectangle.
    fn bounding_rect(&self, node: NodeId) -> Rect;

    /// The element's padding box in viewport coordinates.
    fn client_rect(&self, node: NodeId) -> Rect;

    /// [CSSOM View § 7 offsetParent](https://drafts.csswg.org/cssom-view/#dom-htmlelement-offsetparent)
    fn offset_parent(&self, node: NodeId) -> Option<NodeId>;

    /// The viewport, i.e. the initial containing block.
    fn viewport(&self) -> Rect;

    /// Bring layout up to date with every style and tree write made so far.
    /// Called before geometry is read.
    fn flush_layout(&mut self) {}

    /// The inline inset value (in CSS pixels) `node` currently carries, if
    /// any. Anything that rewrites the element's inline style may drop it.
    fn inline_inset(&self, node: NodeId, side: InsetSide) -> Option<f32>;

    /// Write an inline inset value (in CSS pixels) on `node`.
    fn set_inset(&mut self, node: NodeId, side: InsetSide, px: f32);
}

/// Opaque handle for one observation registered with a [`LayoutObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Box change notification, decoupled from how the host detects changes
/// (native observers, polling, or a test driving it by hand).
pub trait LayoutObserver {
    /// Start watching `nodes`. Any change to any of their boxes reports the
    /// returned handle from [`take_records`](Self::take_records).
    fn observe(&mut self, nodes: &[NodeId]) -> SubscriptionId;

    /// Stop watching. Unknown handles are ignored.
    fn unobserve(&mut self, id: SubscriptionId);

    /// Subscriptions whose boxes may have changed since the last call, each
    /// listed once, in the order their first change happened.
    fn take_records(&mut self) -> Vec<SubscriptionId>;
}
