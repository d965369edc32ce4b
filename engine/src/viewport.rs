//! Host viewport capabilities: page scroll locking and visibility reports.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use vitrine_types::ui::AnchorId;

/// The page's scroll suppression switch.
///
/// There is exactly one page, and only one overlay can hold it, so
/// implementations just store the latest value.
pub trait ScrollLock {
    fn set_locked(&self, locked: bool);
}

/// A [`ScrollLock`] backed by a shared flag. Clones observe the same flag.
#[derive(Clone, Default)]
pub struct SharedScrollLock {
    locked: Arc<AtomicBool>,
}

impl SharedScrollLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }
}

impl ScrollLock for SharedScrollLock {
    fn set_locked(&self, locked: bool) {
        self.locked.store(locked, Ordering::Release);
    }
}

impl fmt::Debug for SharedScrollLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedScrollLock")
            .field("locked", &self.is_locked())
            .finish()
    }
}

/// How much of an anchor the host currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub anchor: AnchorId,
    /// Visible fraction of the anchor in `0.0..=1.0`.
    pub ratio: f32,
}

impl IntersectionEntry {
    #[must_use]
    pub fn new(anchor: AnchorId, ratio: f32) -> Self {
        Self {
            anchor,
            ratio: if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) },
        }
    }

    /// Visible fraction from cell areas. An empty anchor is never visible.
    #[must_use]
    pub fn from_areas(anchor: AnchorId, visible: u32, total: u32) -> Self {
        if total == 0 {
            return Self::new(anchor, 0.0);
        }
        Self::new(anchor, visible as f32 / total as f32)
    }

    #[must_use]
    pub fn is_intersecting(&self) -> bool {
        self.ratio > 0.0
    }

    /// Whether this entry counts as "entered the viewport" at `threshold`.
    #[must_use]
    pub fn qualifies(&self, threshold: f32) -> bool {
        self.is_intersecting() && self.ratio >= threshold
    }
}
