//! Anchor validity.
//!
//! [CSS Anchor Positioning § 2.4 Determining the anchor](https://drafts.csswg.org/css-anchor-position-1/#acceptable-anchor-element)
//!
//! "An element el is a acceptable anchor element for an absolutely
//! positioned element query el if all of the following are true:
//!
//! - Either el is a descendant of query el's containing block, or query el's
//!   containing block is the initial containing block.
//! - If el has the same containing block as query el, el is not absolutely
//!   positioned.
//! - If el has a different containing block from query el, the last
//!   containing block in el's containing block chain before reaching query
//!   el's containing block is not absolutely positioned."
//!
//! Validity is a relation between exactly one anchor and one target. Each
//! call evaluates it from scratch.

use anchor_dom::NodeId;
use log::trace;

use crate::containing_block::{ContainingBlock, containing_block};
use crate::host::LayoutHost;
use crate::scheme::{is_absolutely_positioned, is_rendered};

/// Which rule decided a validity check. Useful for diagnostics; the
/// polyfill itself only looks at [`AnchorValidity::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorValidity {
    /// All rules passed.
    Valid,
    /// The anchor or the target is not rendered (`display: none` on itself
    /// or an ancestor, detached, or skipped by the host).
    NotRendered,
    /// The anchor is outside the target's containing block.
    OutsideContainingBlock,
    /// Same containing block, but the anchor is absolutely positioned.
    AbsolutelyPositionedSibling,
    /// The last containing block before the target's one is absolutely
    /// positioned.
    AbsolutelyPositionedChain(NodeId),
    /// The anchor's containing-block chain never passes through the
    /// target's containing block.
    EscapesContainingBlock,
}

impl AnchorValidity {
    /// Whether the anchor may be used.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Whether `anchor` is an acceptable anchor element for `target`.
#[must_use]
pub fn is_valid_anchor<H: LayoutHost + ?Sized>(host: &H, anchor: NodeId, target: NodeId) -> bool {
    check_anchor(host, anchor, target).is_valid()
}

/// Like [`is_valid_anchor`], but reports which rule decided the outcome.
#[must_use]
pub fn check_anchor<H: LayoutHost + ?Sized>(
    host: &H,
    anchor: NodeId,
    target: NodeId,
) -> AnchorValidity {
    let verdict = evaluate(host, anchor, target);
    trace!("anchor #{} for target #{}: {verdict:?}", anchor.0, target.0);
    verdict
}

fn evaluate<H: LayoutHost + ?Sized>(host: &H, anchor: NodeId, target: NodeId) -> AnchorValidity {
    if !is_rendered(host, anchor) || !is_rendered(host, target) {
        return AnchorValidity::NotRendered;
    }

    let target_cb = containing_block(host, target);

    // Rule 1: descendant of the target's containing block, unless that is
    // the initial containing block.
    if let ContainingBlock::Element(cb) = target_cb {
        if !host.tree().is_descendant_of(anchor, cb) {
            return AnchorValidity::OutsideContainingBlock;
        }
    }

    let anchor_cb = containing_block(host, anchor);

    // Rule 2: same containing block.
    if anchor_cb == target_cb {
        return if is_absolutely_positioned(host, anchor) {
            AnchorValidity::AbsolutelyPositionedSibling
        } else {
            AnchorValidity::Valid
        };
    }

    // Rule 3: walk outward from the anchor's containing block until the
    // next step would be the target's containing block.
    let ContainingBlock::Element(mut last) = anchor_cb else {
        return AnchorValidity::EscapesContainingBlock;
    };
    loop {
        let next = containing_block(host, last);
        if next == target_cb {
            return if is_absolutely_positioned(host, last) {
                AnchorValidity::AbsolutelyPositionedChain(last)
            } else {
                AnchorValidity::Valid
            };
        }
        match next {
            ContainingBlock::Element(id) => last = id,
            ContainingBlock::Initial => return AnchorValidity::EscapesContainingBlock,
        }
    }
}
