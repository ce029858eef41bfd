//! The polyfill entry point.
//!
//! [`Polyfill::apply`] finds every element whose insets use `anchor()`,
//! resolves each referenced name to an anchor, writes the resulting insets,
//! and keeps them current through [`Polyfill::pump`].

use anchor_dom::NodeId;
use log::{debug, info};
use serde::Serialize;

use crate::host::{LayoutHost, LayoutObserver};
use crate::inset::{InsetBinding, InsetRecord};
use crate::observe::{AnchorBinding, AnchorObservers, PumpOutcome};
use crate::select::select_anchor;
use crate::style::{AnchorName, InsetSide};

/// Tunables for [`Polyfill`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolyfillOptions {
    /// How many rounds of change records [`Polyfill::pump`] drains before
    /// giving up on a host that keeps reporting changes.
    pub max_notify_rounds: usize,
}

impl Default for PolyfillOptions {
    fn default() -> Self {
        Self {
            max_notify_rounds: 16,
        }
    }
}

/// A target whose `anchor()` insets were resolved against an anchor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedTarget {
    /// The positioned element.
    pub target: NodeId,
    /// The anchor it was resolved against.
    pub anchor: NodeId,
    /// The anchor name used.
    pub name: AnchorName,
    /// The insets written.
    pub insets: InsetRecord,
}

/// A group of `anchor()` insets that found no anchor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnresolvedTarget {
    /// The element that could not be positioned.
    pub target: NodeId,
    /// The name that did not resolve; `None` when the function had no name
    /// and the element has no `position-anchor`.
    pub name: Option<AnchorName>,
    /// Sides that received their fallback value instead.
    pub fallbacks: Vec<InsetSide>,
}

/// What one [`Polyfill::apply`] pass did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplyReport {
    /// Resolved (target, anchor) pairs, in tree order of their targets.
    pub positioned: Vec<PositionedTarget>,
    /// Groups left unresolved.
    pub unresolved: Vec<UnresolvedTarget>,
}

/// Anchor positioning for one document.
#[derive(Debug, Default)]
pub struct Polyfill {
    options: PolyfillOptions,
    observers: AnchorObservers,
}

impl Polyfill {
    /// A polyfill with the given options and nothing applied yet.
    #[must_use]
    pub fn new(options: PolyfillOptions) -> Self {
        Self {
            options,
            observers: AnchorObservers::new(),
        }
    }

    /// The active bindings.
    #[must_use]
    pub const fn observers(&self) -> &AnchorObservers {
        &self.observers
    }

    /// Resolve and apply every `anchor()` inset in the document.
    ///
    /// Applying again replaces every binding made by an earlier pass,
    /// including those of elements that no longer use `anchor()`.
    pub fn apply<H>(&mut self, host: &mut H) -> ApplyReport
    where
        H: LayoutHost + LayoutObserver + ?Sized,
    {
        let mut report = ApplyReport::default();
        self.clear(host);

        for (target, groups) in collect_targets(&*host) {
            for (name, insets) in groups {
                let anchor = name
                    .as_ref()
                    .and_then(|name| select_anchor(&*host, target, name));

                match (name, anchor) {
                    (Some(name), Some(anchor)) => {
                        let id = self.observers.activate(
                            host,
                            AnchorBinding {
                                anchor,
                                target,
                                name: name.clone(),
                                insets,
                            },
                        );
                        report.positioned.push(PositionedTarget {
                            target,
                            anchor,
                            name,
                            insets: self.observers.applied(id).unwrap_or_default(),
                        });
                    }
                    (name, _) => {
                        let fallbacks = apply_fallbacks(host, target, &insets);
                        report.unresolved.push(UnresolvedTarget {
                            target,
                            name,
                            fallbacks,
                        });
                    }
                }
            }
        }

        info!(
            "positioned {} anchored target(s), {} unresolved",
            report.positioned.len(),
            report.unresolved.len()
        );
        report
    }

    /// Recompute insets for every binding whose boxes changed since the
    /// last call.
    pub fn pump<H>(&mut self, host: &mut H) -> PumpOutcome
    where
        H: LayoutHost + LayoutObserver + ?Sized,
    {
        let outcome = self
            .observers
            .process_records(host, self.options.max_notify_rounds);
        if outcome.rounds > 0 {
            debug!("{outcome:?}");
        }
        outcome
    }

    /// Drop every binding and its subscription. Insets already written stay.
    pub fn clear<H>(&mut self, host: &mut H)
    where
        H: LayoutObserver + ?Sized,
    {
        let ids: Vec<_> = self.observers.bindings().map(|(id, _)| id).collect();
        for id in ids {
            let _ = self.observers.deactivate(host, id);
        }
    }
}

/// Bindings of one target grouped by effective anchor name, in the order
/// the names first appear (`top right bottom left`).
type TargetGroups = Vec<(Option<AnchorName>, Vec<InsetBinding>)>;

/// Every element with at least one `anchor()` inset, in tree order.
fn collect_targets<H: LayoutHost + ?Sized>(host: &H) -> Vec<(NodeId, TargetGroups)> {
    host.tree()
        .iter_all()
        .filter_map(|node| {
            let style = host.style(node)?;
            let mut groups: TargetGroups = Vec::new();
            for (side, function) in style.anchor_insets() {
                // An unnamed anchor() refers to the default anchor.
                let name = function
                    .name
                    .clone()
                    .or_else(|| style.position_anchor.clone());
                let binding = InsetBinding {
                    side,
                    function: function.clone(),
                };
                match groups.iter_mut().find(|(group, _)| *group == name) {
                    Some((_, bindings)) => bindings.push(binding),
                    None => groups.push((name, vec![binding])),
                }
            }
            (!groups.is_empty()).then_some((node, groups))
        })
        .collect()
}

fn apply_fallbacks<H: LayoutHost + ?Sized>(
    host: &mut H,
    target: NodeId,
    insets: &[InsetBinding],
) -> Vec<InsetSide> {
    let mut applied = Vec::new();
    for binding in insets {
        if let Some(fallback) = binding.function.fallback {
            host.set_inset(target, binding.side, fallback);
            applied.push(binding.side);
        }
    }
    applied
}
