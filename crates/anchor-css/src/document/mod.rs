//! An in-memory host.
//!
//! [`StaticDocument`] owns a [`DomTree`], the style parsed from each
//! element's `style` attribute, and box geometry supplied from outside (a
//! fixture, a test, or a real layout engine feeding results in). It
//! implements both host traits, recording box changes as observer records
//! the way a `ResizeObserver` would.

mod fixture;

pub use fixture::FixtureError;

use std::collections::{BTreeMap, HashMap};

use anchor_dom::{DomTree, ElementData, NodeId};

use crate::geometry::{EdgeSizes, Rect};
use crate::host::{LayoutHost, LayoutObserver, SubscriptionId};
use crate::inset::InsetRecord;
use crate::scheme::{is_rendered, position_type};
use crate::style::{
    Display, ElementStyle, InsetSide, InsetValue, PositionType, default_display_for_element,
    parse_inline_style,
};

/// Box geometry of one element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxGeometry {
    /// The border box in viewport coordinates.
    pub border_box: Rect,
    /// Border widths; the padding box is the border box minus these.
    pub border: EdgeSizes,
}

impl BoxGeometry {
    /// A box without borders.
    #[must_use]
    pub const fn from_rect(border_box: Rect) -> Self {
        Self {
            border_box,
            border: EdgeSizes::uniform(0.0),
        }
    }
}

/// A document whose layout is given rather than computed.
#[derive(Debug, Clone)]
pub struct StaticDocument {
    tree: DomTree,
    styles: HashMap<NodeId, ElementStyle>,
    boxes: HashMap<NodeId, BoxGeometry>,
    inline_insets: HashMap<NodeId, InsetRecord>,
    viewport: Rect,
    watchers: BTreeMap<SubscriptionId, Vec<NodeId>>,
    pending: Vec<SubscriptionId>,
    next_subscription: u64,
    layout_flushes: usize,
}

impl StaticDocument {
    /// Wrap `tree`, parsing the `style` attribute of every element.
    #[must_use]
    pub fn new(tree: DomTree, viewport: Rect) -> Self {
        let styles = tree
            .iter_all()
            .filter_map(|id| {
                let element = tree.as_element(id)?;
                Some((id, parse_inline_style(element.style_attr().unwrap_or_default())))
            })
            .collect();
        Self {
            tree,
            styles,
            boxes: HashMap::new(),
            inline_insets: HashMap::new(),
            viewport,
            watchers: BTreeMap::new(),
            pending: Vec::new(),
            next_subscription: 0,
            layout_flushes: 0,
        }
    }

    /// Build a document from a JSON page fixture.
    ///
    /// # Errors
    /// Returns [`FixtureError`] if the JSON is malformed or describes an
    /// impossible page.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        fixture::load(json)
    }

    /// Look up an element by its `id` attribute.
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.get_element_by_id(id)
    }

    /// Append a new element under `parent`, parsing its `style` attribute.
    pub fn append_element(&mut self, parent: NodeId, data: ElementData) -> NodeId {
        let style = parse_inline_style(data.style_attr().unwrap_or_default());
        let id = self.tree.append_element(parent, data);
        let _ = self.styles.insert(id, style);
        id
    }

    /// Replace an element's `style` attribute. Inset values written inline
    /// earlier are dropped with the old attribute. Watchers of the element
    /// are notified, since a style change can move its box.
    pub fn set_style(&mut self, node: NodeId, text: &str) {
        if self.tree.as_element(node).is_none() {
            return;
        }
        let _ = self.styles.insert(node, parse_inline_style(text));
        let _ = self.inline_insets.remove(&node);
        self.notify(node);
    }

    /// Set an element's border box, notifying watchers if it changed.
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        let border = self.boxes.get(&node).map(|b| b.border).unwrap_or_default();
        self.set_geometry(
            node,
            BoxGeometry {
                border_box: rect,
                border,
            },
        );
    }

    /// Set an element's full box geometry, notifying watchers if it changed.
    pub fn set_geometry(&mut self, node: NodeId, geometry: BoxGeometry) {
        if self.boxes.insert(node, geometry) != Some(geometry) {
            self.notify(node);
        }
    }

    /// Detach `node` from the document. Watchers of anything in the removed
    /// subtree are notified so they can tear themselves down.
    pub fn remove(&mut self, node: NodeId) {
        let removed: Vec<NodeId> = self.tree.descendants(node).collect();
        self.tree.detach(node);
        for id in removed {
            self.notify(id);
        }
    }

    /// The inline inset values written so far.
    #[must_use]
    pub fn inline_insets(&self, node: NodeId) -> InsetRecord {
        self.inline_insets.get(&node).copied().unwrap_or_default()
    }

    /// The used pixel value of an inset: the inline value if one was
    /// written, else the authored length, else `None` (`auto` or an
    /// unresolved `anchor()`).
    #[must_use]
    pub fn computed_inset(&self, node: NodeId, side: InsetSide) -> Option<f32> {
        self.inline_insets(node).get(side).or_else(|| {
            match self.styles.get(&node).map(|style| style.inset(side)) {
                Some(InsetValue::Px(px)) => Some(*px),
                _ => None,
            }
        })
    }

    /// How many times layout was flushed.
    #[must_use]
    pub const fn layout_flushes(&self) -> usize {
        self.layout_flushes
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.watchers.len()
    }

    fn notify(&mut self, node: NodeId) {
        for (&id, nodes) in &self.watchers {
            if nodes.contains(&node) && !self.pending.contains(&id) {
                self.pending.push(id);
            }
        }
    }
}

impl LayoutHost for StaticDocument {
    fn tree(&self) -> &DomTree {
        &self.tree
    }

    fn style(&self, node: NodeId) -> Option<&ElementStyle> {
        self.styles.get(&node)
    }

    fn display(&self, node: NodeId) -> Option<Display> {
        let element = self.tree.as_element(node)?;
        let default = default_display_for_element(&element.tag_name);
        Some(
            self.styles
                .get(&node)
                .map_or(default, |style| style.display_or(default)),
        )
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        if !is_rendered(self, node) {
            return Rect::default();
        }
        self.boxes
            .get(&node)
            .map(|b| b.border_box)
            .unwrap_or_default()
    }

    fn client_rect(&self, node: NodeId) -> Rect {
        if !is_rendered(self, node) {
            return Rect::default();
        }
        self.boxes
            .get(&node)
            .map(|b| b.border_box.deflate(&b.border))
            .unwrap_or_default()
    }

    /// [CSSOM View § 7](https://drafts.csswg.org/cssom-view/#dom-htmlelement-offsetparent)
    ///
    /// "1. If any of the following holds true return null and terminate this
    /// algorithm: The element does not have an associated box. The element is
    /// the root element. The element is the HTML body element. The element's
    /// computed value of the position property is fixed and no ancestor
    /// establishes a fixed position containing block.
    ///
    /// 2. Let ancestor be the element's parent element.
    ///
    /// 3. While ancestor is not null: If ancestor is a containing block of
    /// absolutely-positioned descendants, or it is the body element, or the
    /// element's position is static and ancestor is td, th, or table,
    /// terminate this algorithm and return ancestor."
    fn offset_parent(&self, node: NodeId) -> Option<NodeId> {
        let tree = &self.tree;
        if !is_rendered(self, node)
            || tree.document_element() == Some(node)
            || tree.body() == Some(node)
        {
            return None;
        }
        let position = position_type(self, node);
        let body = tree.body();

        tree.ancestors(node)
            .filter(|&id| tree.as_element(id).is_some())
            .find(|&id| {
                if position == PositionType::Fixed {
                    return self.establishes_containing_block(id);
                }
                position_type(self, id).is_positioned()
                    || self.establishes_containing_block(id)
                    || Some(id) == body
                    || (position == PositionType::Static
                        && ["td", "th", "table"].iter().any(|tag| tree.has_tag(id, tag)))
            })
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn flush_layout(&mut self) {
        self.layout_flushes += 1;
    }

    fn inline_inset(&self, node: NodeId, side: InsetSide) -> Option<f32> {
        self.inline_insets.get(&node).and_then(|record| record.get(side))
    }

    fn set_inset(&mut self, node: NodeId, side: InsetSide, px: f32) {
        self.inline_insets.entry(node).or_default().set(side, Some(px));
    }
}

impl LayoutObserver for StaticDocument {
    fn observe(&mut self, nodes: &[NodeId]) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        let _ = self.watchers.insert(id, nodes.to_vec());
        id
    }

    fn unobserve(&mut self, id: SubscriptionId) {
        let _ = self.watchers.remove(&id);
        self.pending.retain(|&pending| pending != id);
    }

    fn take_records(&mut self) -> Vec<SubscriptionId> {
        std::mem::take(&mut self.pending)
    }
}
