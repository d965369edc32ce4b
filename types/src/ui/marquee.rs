//! Endless scrolling label for the empty-cart placeholder.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarqueeDirection {
    /// Text enters from the right edge and travels left.
    RightToLeft,
    /// Text enters from the left edge and travels right.
    LeftToRight,
}

/// A looping, linear marquee. It never completes.
#[derive(Debug, Clone)]
pub struct MarqueeEffect {
    band: Vec<char>,
    direction: MarqueeDirection,
    period: Duration,
    elapsed: Duration,
}

impl MarqueeEffect {
    /// `word` repeated `repeat` times, separated by single spaces, scrolled once
    /// per `period`.
    #[must_use]
    pub fn new(word: &str, repeat: usize, direction: MarqueeDirection, period: Duration) -> Self {
        let mut band: Vec<char> = Vec::new();
        for _ in 0..repeat.max(1) {
            band.extend(word.chars());
            band.push(' ');
        }
        Self {
            band,
            direction,
            period,
            elapsed: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
        if !self.period.is_zero() {
            // Keep elapsed bounded; the animation loops forever.
            let period = self.period.as_nanos();
            let wrapped = self.elapsed.as_nanos() % period;
            self.elapsed = Duration::from_nanos(u64::try_from(wrapped).unwrap_or(0));
        }
    }

    /// The `width` characters currently visible.
    #[must_use]
    pub fn window(&self, width: usize) -> String {
        let len = self.band.len();
        if len == 0 || width == 0 {
            return String::new();
        }
        let shift = if self.period.is_zero() {
            0
        } else {
            let cells = self.elapsed.as_nanos() * len as u128 / self.period.as_nanos();
            (cells % len as u128) as usize
        };
        let start = match self.direction {
            MarqueeDirection::RightToLeft => shift,
            MarqueeDirection::LeftToRight => (len - shift) % len,
        };
        (0..width).map(|i| self.band[(start + i) % len]).collect()
    }
}
