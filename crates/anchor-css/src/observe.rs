//! Keeping anchored insets up to date.
//!
//! Each active (anchor, target) pair watches three boxes through the host's
//! [`LayoutObserver`]: the anchor, the target, and the target's offset
//! parent. When any of them may have changed, the insets are recomputed from
//! scratch and only the values that differ from what the target currently
//! carries are written back. Inset
//! writes do not resize the watched boxes, so a recomputation never
//! schedules another one for the same reason.

use std::collections::BTreeMap;

use anchor_common::warning::warn_once;
use anchor_dom::NodeId;
use log::{debug, trace};

use crate::host::{LayoutHost, LayoutObserver, SubscriptionId};
use crate::inset::{InsetBinding, InsetRecord, compute_insets};
use crate::style::AnchorName;

/// A resolved (anchor, target) pair and the inset properties it drives.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorBinding {
    /// The selected anchor element.
    pub anchor: NodeId,
    /// The element being positioned.
    pub target: NodeId,
    /// The name the anchor was selected by.
    pub name: AnchorName,
    /// The inset properties of `target` that refer to `anchor`.
    pub insets: Vec<InsetBinding>,
}

/// What happened when a subscription was serviced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Refresh {
    /// Insets were recomputed and these values were written.
    Updated(InsetRecord),
    /// Insets were recomputed and nothing changed.
    Unchanged,
    /// The anchor or target left the document; the subscription is gone.
    Detached,
    /// The handle does not belong to an active binding.
    Unknown,
}

/// Summary of one [`AnchorObservers::process_records`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpOutcome {
    /// Subscriptions whose insets were written.
    pub updated: usize,
    /// Subscriptions torn down because an element was removed.
    pub detached: usize,
    /// Rounds of records drained.
    pub rounds: usize,
    /// Whether records were still pending when the round limit was hit.
    pub saturated: bool,
}

#[derive(Debug)]
struct ActiveBinding {
    binding: AnchorBinding,
    offset_parent: Option<NodeId>,
    applied: InsetRecord,
}

/// The set of active bindings, keyed by their host subscription.
#[derive(Debug, Default)]
pub struct AnchorObservers {
    active: BTreeMap<SubscriptionId, ActiveBinding>,
}

impl AnchorObservers {
    /// No active bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether there are no active bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// The active bindings with their subscription handles.
    pub fn bindings(&self) -> impl Iterator<Item = (SubscriptionId, &AnchorBinding)> {
        self.active.iter().map(|(&id, active)| (id, &active.binding))
    }

    /// The insets computed for a subscription by its latest refresh.
    #[must_use]
    pub fn applied(&self, id: SubscriptionId) -> Option<InsetRecord> {
        self.active.get(&id).map(|active| active.applied)
    }

    /// Start tracking `binding`: subscribe to its boxes and apply its insets
    /// once right away.
    pub fn activate<H>(&mut self, host: &mut H, binding: AnchorBinding) -> SubscriptionId
    where
        H: LayoutHost + LayoutObserver + ?Sized,
    {
        let offset_parent = host.offset_parent(binding.target);
        let id = host.observe(&watched_nodes(&binding, offset_parent));
        let mut active = ActiveBinding {
            binding,
            offset_parent,
            applied: InsetRecord::default(),
        };
        let _ = active.recompute(host);
        debug!(
            "activated {} for target #{} (anchor #{}) as {id:?}",
            active.binding.name, active.binding.target.0, active.binding.anchor.0
        );
        let _ = self.active.insert(id, active);
        id
    }

    /// Stop tracking one subscription. Returns whether it was active.
    pub fn deactivate<H>(&mut self, host: &mut H, id: SubscriptionId) -> bool
    where
        H: LayoutObserver + ?Sized,
    {
        if self.active.remove(&id).is_some() {
            host.unobserve(id);
            true
        } else {
            false
        }
    }

    /// Service one change record.
    pub fn refresh<H>(&mut self, host: &mut H, id: SubscriptionId) -> Refresh
    where
        H: LayoutHost + LayoutObserver + ?Sized,
    {
        let Some(mut active) = self.active.remove(&id) else {
            return Refresh::Unknown;
        };

        let tree = host.tree();
        if !tree.is_connected(active.binding.anchor) || !tree.is_connected(active.binding.target)
        {
            host.unobserve(id);
            debug!(
                "target #{} or anchor #{} left the document; dropping {id:?}",
                active.binding.target.0, active.binding.anchor.0
            );
            return Refresh::Detached;
        }

        // A new offset parent is a new box to watch.
        let mut id = id;
        let offset_parent = host.offset_parent(active.binding.target);
        if offset_parent != active.offset_parent {
            host.unobserve(id);
            id = host.observe(&watched_nodes(&active.binding, offset_parent));
            active.offset_parent = offset_parent;
        }

        let written = active.recompute(host);
        let _ = self.active.insert(id, active);
        if written.is_empty() {
            Refresh::Unchanged
        } else {
            Refresh::Updated(written)
        }
    }

    /// Drain change records from the host until none are left, at most
    /// `max_rounds` times. Records for subscriptions that are no longer
    /// active are ignored.
    pub fn process_records<H>(&mut self, host: &mut H, max_rounds: usize) -> PumpOutcome
    where
        H: LayoutHost + LayoutObserver + ?Sized,
    {
        let mut outcome = PumpOutcome::default();
        loop {
            let records = host.take_records();
            if records.is_empty() {
                return outcome;
            }
            if outcome.rounds == max_rounds {
                warn_once(
                    "anchor",
                    &format!("layout kept changing after {max_rounds} update rounds; giving up"),
                );
                outcome.saturated = true;
                return outcome;
            }
            outcome.rounds += 1;
            for id in records {
                match self.refresh(host, id) {
                    Refresh::Updated(_) => outcome.updated += 1,
                    Refresh::Detached => outcome.detached += 1,
                    Refresh::Unchanged | Refresh::Unknown => {}
                }
            }
        }
    }
}

impl ActiveBinding {
    /// Recompute the insets and write the ones the target does not already
    /// carry. Returns what was written.
    fn recompute<H: LayoutHost + ?Sized>(&mut self, host: &mut H) -> InsetRecord {
        host.flush_layout();
        let AnchorBinding {
            anchor,
            target,
            insets,
            ..
        } = &self.binding;
        let record = compute_insets(&*host, *anchor, *target, insets);

        let mut current = InsetRecord::default();
        for (side, _) in record.iter() {
            current.set(side, host.inline_inset(*target, side));
        }
        let written = record.changed_since(&current);
        for (side, value) in written.iter() {
            trace!("target #{}: {side} = {value}px", target.0);
            host.set_inset(*target, side, value);
        }
        self.applied = record;
        written
    }
}

fn watched_nodes(binding: &AnchorBinding, offset_parent: Option<NodeId>) -> Vec<NodeId> {
    let mut nodes = vec![binding.anchor, binding.target];
    nodes.extend(offset_parent);
    nodes
}
