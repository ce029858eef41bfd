//! Containing-block resolution.
//!
//! [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
//!
//! "The position and size of an element's box(es) are sometimes calculated
//! relative to a certain rectangle, called the containing block of the
//! element."

use std::fmt;

use anchor_dom::NodeId;

use crate::host::LayoutHost;
use crate::scheme::position_type;
use crate::style::Display;

/// Either an element's box or the initial containing block.
///
/// The initial containing block is a value in its own right: it equals
/// itself and never equals any element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainingBlock {
    /// The containing block is formed by this ancestor's box.
    Element(NodeId),
    /// [§ 10.1](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
    ///
    /// "The containing block in which the root element lives is a rectangle
    /// called the initial containing block."
    Initial,
}

impl ContainingBlock {
    /// The establishing element, unless this is the initial containing block.
    #[must_use]
    pub const fn element(self) -> Option<NodeId> {
        match self {
            Self::Element(id) => Some(id),
            Self::Initial => None,
        }
    }

    /// Whether this is the initial containing block.
    #[must_use]
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::Initial)
    }
}

impl fmt::Display for ContainingBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(id) => write!(f, "#{}", id.0),
            Self::Initial => f.write_str("initial containing block"),
        }
    }
}

/// Resolve the containing block of `node` against the host's current style.
///
/// [§ 10.1](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
///
/// - "If the element has 'position: absolute', the containing block is
///   established by the nearest ancestor with a 'position' of 'absolute',
///   'relative' or 'fixed'". Sticky ancestors count too, and so does any
///   ancestor the host says establishes a containing block (transforms,
///   filters, ...). `position: fixed` is resolved the same way.
/// - "For other elements, if the element's position is 'relative' or
///   'static', the containing block is formed by the content edge of the
///   nearest ancestor box that is a block container or which establishes a
///   formatting context."
/// - If no ancestor qualifies, the result is [`ContainingBlock::Initial`].
#[must_use]
pub fn containing_block<H: LayoutHost + ?Sized>(host: &H, node: NodeId) -> ContainingBlock {
    let tree = host.tree();
    let absolutely_positioned = position_type(host, node).is_absolutely_positioned();

    tree.ancestors(node)
        .filter(|&id| {
            // Ancestors without a box (display: contents) are invisible here.
            host.display(id).is_some_and(Display::generates_box)
        })
        .find(|&id| {
            if absolutely_positioned {
                position_type(host, id).is_positioned() || host.establishes_containing_block(id)
            } else {
                host.display(id).is_some_and(Display::is_block_container)
            }
        })
        .map_or(ContainingBlock::Initial, ContainingBlock::Element)
}

/// The chain of containing blocks above `node`: its containing block, that
/// element's containing block, and so on, ending with
/// [`ContainingBlock::Initial`].
#[must_use]
pub fn containing_block_chain<H: LayoutHost + ?Sized>(
    host: &H,
    node: NodeId,
) -> ContainingBlockChain<'_, H> {
    ContainingBlockChain {
        host,
        next: Some(containing_block(host, node)),
    }
}

/// Iterator returned by [`containing_block_chain`].
pub struct ContainingBlockChain<'a, H: ?Sized> {
    host: &'a H,
    next: Option<ContainingBlock>,
}

impl<H: LayoutHost + ?Sized> Iterator for ContainingBlockChain<'_, H> {
    type Item = ContainingBlock;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        // Each step moves to a strict ancestor, so the walk terminates.
        self.next = current
            .element()
            .map(|id| containing_block(self.host, id));
        Some(current)
    }
}
