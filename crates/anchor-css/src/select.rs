//! Anchor selection.
//!
//! When several elements share an anchor name, the target uses the first
//! acceptable one in tree order. Size and later position in the document do
//! not matter.

use anchor_dom::NodeId;
use log::debug;

use crate::host::LayoutHost;
use crate::style::AnchorName;
use crate::validate::is_valid_anchor;

/// Every connected element carrying `anchor-name: <name>`, in tree order
/// (pre-order, parents before children, siblings in source order).
pub fn anchor_candidates<'a, H: LayoutHost + ?Sized>(
    host: &'a H,
    name: &'a AnchorName,
) -> impl Iterator<Item = NodeId> + 'a {
    host.tree()
        .iter_all()
        .filter(move |&id| host.style(id).is_some_and(|style| style.has_anchor_name(name)))
}

/// The first of `candidates` that is a valid anchor for `target`.
///
/// Candidates are taken in the order given; pass them in tree order.
pub fn select_from<H, I>(host: &H, target: NodeId, candidates: I) -> Option<NodeId>
where
    H: LayoutHost + ?Sized,
    I: IntoIterator<Item = NodeId>,
{
    candidates
        .into_iter()
        .find(|&candidate| is_valid_anchor(host, candidate, target))
}

/// The anchor `target` resolves `name` to, or `None` if no element with
/// that name is acceptable.
#[must_use]
pub fn select_anchor<H: LayoutHost + ?Sized>(
    host: &H,
    target: NodeId,
    name: &AnchorName,
) -> Option<NodeId> {
    let selected = select_from(host, target, anchor_candidates(host, name));
    debug!(
        "target #{} resolved {name} to {}",
        target.0,
        selected.map_or_else(|| "nothing".to_string(), |id| format!("#{}", id.0))
    );
    selected
}
