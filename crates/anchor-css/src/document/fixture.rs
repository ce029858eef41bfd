//! JSON page fixtures.
//!
//! ```json
//! {
//!   "viewport": { "width": 800, "height": 600 },
//!   "root": {
//!     "tag": "html",
//!     "children": [{
//!       "tag": "body",
//!       "children": [
//!         { "tag": "div", "id": "a", "style": "anchor-name: --a", "rect": [0, 0, 50, 20] }
//!       ]
//!     }]
//!   }
//! }
//! ```
//!
//! `rect` is `[x, y, width, height]` of the border box and `border` is
//! `[top, right, bottom, left]`.

use std::collections::HashSet;

use anchor_dom::{DomTree, ElementData, NodeId, NodeType};
use serde::Deserialize;
use thiserror::Error;

use super::{BoxGeometry, StaticDocument};
use crate::geometry::{EdgeSizes, Rect};

/// Why a fixture could not be loaded.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The text is not valid fixture JSON.
    #[error("invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// An element has an empty tag name.
    #[error("element with an empty tag name")]
    EmptyTag,
    /// Two elements share an `id`.
    #[error("duplicate element id '{0}'")]
    DuplicateId(String),
    /// A box has a negative or non-finite size.
    #[error("element <{tag}> has an invalid box {rect:?}")]
    InvalidRect {
        /// Tag of the offending element.
        tag: String,
        /// The rectangle as written.
        rect: [f32; 4],
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PageFixture {
    #[serde(default)]
    viewport: ViewportFixture,
    root: NodeFixture,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ViewportFixture {
    width: f32,
    height: f32,
}

impl Default for ViewportFixture {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeFixture {
    tag: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    rect: Option<[f32; 4]>,
    #[serde(default)]
    border: Option<[f32; 4]>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    children: Vec<NodeFixture>,
}

pub(super) fn load(json: &str) -> Result<StaticDocument, FixtureError> {
    let page: PageFixture = serde_json::from_str(json)?;

    let mut tree = DomTree::new();
    let mut geometry = Vec::new();
    let mut ids = HashSet::new();
    let root = tree.root();
    build(&mut tree, root, &page.root, &mut geometry, &mut ids)?;

    let viewport = Rect::new(0.0, 0.0, page.viewport.width, page.viewport.height);
    let mut document = StaticDocument::new(tree, viewport);
    for (node, boxes) in geometry {
        document.set_geometry(node, boxes);
    }
    Ok(document)
}

fn build(
    tree: &mut DomTree,
    parent: NodeId,
    fixture: &NodeFixture,
    geometry: &mut Vec<(NodeId, BoxGeometry)>,
    ids: &mut HashSet<String>,
) -> Result<(), FixtureError> {
    if fixture.tag.trim().is_empty() {
        return Err(FixtureError::EmptyTag);
    }

    let mut data = ElementData::new(&fixture.tag);
    if let Some(id) = &fixture.id {
        if !ids.insert(id.clone()) {
            return Err(FixtureError::DuplicateId(id.clone()));
        }
        data = data.with_attr("id", id);
    }
    if let Some(style) = &fixture.style {
        data = data.with_attr("style", style);
    }
    let node = tree.append_element(parent, data);

    if let Some(rect) = fixture.rect {
        let [x, y, width, height] = rect;
        if !rect.iter().all(|v| v.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(FixtureError::InvalidRect {
                tag: fixture.tag.clone(),
                rect,
            });
        }
        let [top, right, bottom, left] = fixture.border.unwrap_or_default();
        geometry.push((
            node,
            BoxGeometry {
                border_box: Rect::new(x, y, width, height),
                border: EdgeSizes {
                    top,
                    right,
                    bottom,
                    left,
                },
            },
        ));
    }

    if let Some(text) = &fixture.text {
        let text_node = tree.alloc(NodeType::Text(text.clone()));
        tree.append_child(node, text_node);
    }
    for child in &fixture.children {
        build(tree, node, child, geometry, ids)?;
    }
    Ok(())
}
