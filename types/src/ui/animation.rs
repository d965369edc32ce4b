use std::time::Duration;

/// Where a finite animation currently is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimPhase {
    /// Not started yet; the effect is still inside its start delay.
    Pending,
    Running { progress: f32 },
    Completed,
}

pub(crate) fn normalized_progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }

    let elapsed = elapsed.as_secs_f32();
    let total = duration.as_secs_f32();
    (elapsed / total).clamp(0.0, 1.0)
}

#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Elapsed-time bookkeeping shared by the storefront's effects.
///
/// Effects are advanced by frame deltas from the host loop rather than by
/// reading a clock, which keeps them deterministic under test.
#[derive(Debug, Clone)]
pub struct EffectTimer {
    elapsed: Duration,
    delay: Duration,
    duration: Duration,
}

impl EffectTimer {
    #[must_use]
    pub fn delayed(delay: Duration, duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            delay,
            duration,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        normalized_progress(self.elapsed.saturating_sub(self.delay), self.duration)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay.saturating_add(self.duration)
    }

    #[must_use]
    pub fn phase(&self) -> AnimPhase {
        if self.is_finished() {
            AnimPhase::Completed
        } else if self.elapsed < self.delay {
            AnimPhase::Pending
        } else {
            AnimPhase::Running {
                progress: self.progress(),
            }
        }
    }
}
