//! Anchor validity, containing blocks, and `anchor()` inset resolution for
//! the anchor positioning polyfill.
//!
//! # Scope
//!
//! This crate implements:
//! - **Containing blocks** ([CSS 2.1 § 10.1](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details))
//!   - Absolute and fixed positioning schemes
//!   - Ancestors that establish containing blocks without being positioned
//!   - Containing-block chains up to the initial containing block
//!
//! - **Anchor validity** ([CSS Anchor Positioning § 2.4](https://drafts.csswg.org/css-anchor-position-1/#acceptable-anchor-element))
//!   - The three acceptable-anchor rules
//!   - Tree-order selection among elements sharing an `anchor-name`
//!
//! - **`anchor()` resolution** ([CSS Anchor Positioning § 3.2](https://drafts.csswg.org/css-anchor-position-1/#anchor-pos))
//!   - Physical, logical, and percentage anchor sides
//!   - Fallback values
//!   - Insets relative to the offset parent's padding box
//!
//! - **Reactivity**
//!   - Box change subscriptions through [`host::LayoutObserver`]
//!   - Coalesced inset writes, teardown on removal
//!
//! - **Inline style parsing** via [`cssparser`] for the properties above
//!
//! # Not Yet Implemented
//!
//! - `anchor-size()`
//! - `position-try` fallbacks
//! - Vertical writing modes and `direction: rtl` for logical sides
//!
//! # Hosts
//!
//! Everything runs against the [`host::LayoutHost`] trait. [`StaticDocument`]
//! is an in-memory host whose geometry is supplied rather than computed;
//! the CLI and the tests use it.

/// Containing-block resolution per [CSS 2.1 § 10.1](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details).
pub mod containing_block;
/// An in-memory host and JSON page fixtures.
pub mod document;
/// Rectangles and edge sizes.
pub mod geometry;
/// Host traits.
pub mod host;
/// `anchor()` inset computation.
pub mod inset;
/// Re-computation of insets when boxes change.
pub mod observe;
/// The polyfill entry point.
pub mod polyfill;
/// Positioning-scheme classification per [CSS Positioned Layout § 2](https://www.w3.org/TR/css-position-3/#position-property).
pub mod scheme;
/// Anchor selection by name.
pub mod select;
/// Resolved style snapshots and inline style parsing.
pub mod style;
/// Anchor validity per [CSS Anchor Positioning § 2.4](https://drafts.csswg.org/css-anchor-position-1/#acceptable-anchor-element).
pub mod validate;

// Re-exports for convenience
pub use containing_block::{ContainingBlock, containing_block, containing_block_chain};
pub use document::{BoxGeometry, FixtureError, StaticDocument};
pub use geometry::{EdgeSizes, Rect};
pub use host::{LayoutHost, LayoutObserver, SubscriptionId};
pub use inset::{InsetBinding, InsetRecord, compute_insets};
pub use observe::{AnchorBinding, AnchorObservers, PumpOutcome, Refresh};
pub use polyfill::{ApplyReport, Polyfill, PolyfillOptions, PositionedTarget, UnresolvedTarget};
pub use scheme::{is_absolutely_positioned, is_rendered, position_type};
pub use select::{anchor_candidates, select_anchor, select_from};
pub use style::{
    AnchorFunction, AnchorName, AnchorSide, Display, ElementStyle, InsetSide, InsetValue,
    PositionType, parse_inline_style,
};
pub use validate::{AnchorValidity, check_anchor, is_valid_anchor};
