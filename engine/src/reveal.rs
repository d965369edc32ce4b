//! One-shot reveal of header regions after they first become visible.

use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use tracing::debug;

use vitrine_types::ui::{AnchorId, RevealAnchor};

use crate::timers::{TimerId, TimerQueue};
use crate::viewport::IntersectionEntry;

pub const DEFAULT_REVEAL_THRESHOLD: f32 = 0.1;
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSettings {
    /// Minimum visible fraction that counts as entering the viewport.
    pub threshold: f32,
    /// Time between first qualifying intersection and the reveal.
    pub delay: Duration,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_REVEAL_THRESHOLD,
            delay: DEFAULT_REVEAL_DELAY,
        }
    }
}

/// Watches a fixed set of anchors and reveals each one once.
///
/// Lifecycle per anchor: observed, then triggered (observation dropped, timer
/// pending), then revealed. [`teardown`](Self::teardown) drops every
/// observation and cancels every pending timer.
#[derive(Debug)]
pub struct VisibilityRevealer {
    settings: RevealSettings,
    anchors: BTreeMap<AnchorId, RevealAnchor>,
    observed: BTreeSet<AnchorId>,
    timers: TimerQueue<AnchorId>,
    scheduled: BTreeMap<AnchorId, TimerId>,
}

impl VisibilityRevealer {
    /// Start observing every anchor in `anchors`.
    #[must_use]
    pub fn mount(anchors: impl IntoIterator<Item = AnchorId>, settings: RevealSettings) -> Self {
        let anchors: BTreeMap<_, _> = anchors
            .into_iter()
            .map(|id| (id, RevealAnchor::new(id)))
            .collect();
        let observed = anchors.keys().copied().collect();
        Self {
            settings,
            anchors,
            observed,
            timers: TimerQueue::new(),
            scheduled: BTreeMap::new(),
        }
    }

    /// Handle an intersection report from the host.
    ///
    /// Returns the anchors that were triggered by this report. Entries for
    /// anchors that are no longer observed are ignored.
    pub fn on_intersections(&mut self, now: Instant, entries: &[IntersectionEntry]) -> Vec<AnchorId> {
        let mut triggered = Vec::new();
        for entry in entries {
            if !self.observed.contains(&entry.anchor) || !entry.qualifies(self.settings.threshold) {
                continue;
            }
            let Some(anchor) = self.anchors.get_mut(&entry.anchor) else {
                continue;
            };
            if !anchor.trigger() {
                continue;
            }
            self.observed.remove(&entry.anchor);
            let timer = self.timers.schedule(now, self.settings.delay, entry.anchor);
            self.scheduled.insert(entry.anchor, timer);
            debug!(
                anchor = entry.anchor.as_str(),
                ratio = entry.ratio,
                delay_ms = self.settings.delay.as_millis() as u64,
                "Reveal scheduled"
            );
            triggered.push(entry.anchor);
        }
        triggered
    }

    /// Fire due reveal timers. Returns the anchors revealed by this call.
    pub fn tick(&mut self, now: Instant) -> Vec<AnchorId> {
        let mut revealed = Vec::new();
        for (timer, id) in self.timers.drain_due(now) {
            if self.scheduled.get(&id) != Some(&timer) {
                continue;
            }
            self.scheduled.remove(&id);
            if let Some(anchor) = self.anchors.get_mut(&id) {
                anchor.reveal();
                debug!(anchor = id.as_str(), "Anchor revealed");
                revealed.push(id);
            }
        }
        revealed
    }

    /// Stop observing everything and cancel pending reveals.
    pub fn teardown(&mut self) {
        let cancelled = std::mem::take(&mut self.scheduled)
            .into_values()
            .filter(|timer| self.timers.cancel(*timer))
            .count();
        let released = self.observed.len();
        self.observed.clear();
        if cancelled > 0 || released > 0 {
            debug!(cancelled, released, "Revealer torn down");
        }
    }

    #[must_use]
    pub fn is_revealed(&self, id: AnchorId) -> bool {
        self.anchors.get(&id).is_some_and(RevealAnchor::is_revealed)
    }

    #[must_use]
    pub fn has_triggered(&self, id: AnchorId) -> bool {
        self.anchors.get(&id).is_some_and(RevealAnchor::has_triggered)
    }

    #[must_use]
    pub fn is_observing(&self, id: AnchorId) -> bool {
        self.observed.contains(&id)
    }

    /// Anchors still waiting for their first qualifying intersection.
    pub fn observed(&self) -> impl Iterator<Item = AnchorId> + '_ {
        self.observed.iter().copied()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    #[must_use]
    pub fn settings(&self) -> RevealSettings {
        self.settings
    }
}
