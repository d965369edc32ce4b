//! Per-glyph entrance staggering for animated labels.

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

use super::animation::{AnimPhase, EffectTimer, ease_out_cubic};

/// Delay between consecutive glyphs starting their rise.
pub const GLYPH_STEP: Duration = Duration::from_millis(50);

/// How long a single glyph takes to rise into place.
pub const GLYPH_RISE: Duration = Duration::from_millis(500);

/// Width override carried by a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphWidth {
    /// Use the glyph's own display width.
    Natural,
    /// Fixed width in terminal cells. Spaces use one cell (half an em).
    Cells(u16),
}

/// Timing metadata for one glyph of a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphDescriptor {
    pub glyph: String,
    pub index: usize,
    pub delay: Duration,
    pub width: GlyphWidth,
}

impl GlyphDescriptor {
    #[must_use]
    pub fn is_space(&self) -> bool {
        self.width != GlyphWidth::Natural
    }

    /// Phase of this glyph's rise, `elapsed` since the label started animating.
    #[must_use]
    pub fn phase(&self, elapsed: Duration) -> AnimPhase {
        let mut timer = EffectTimer::delayed(self.delay, GLYPH_RISE);
        timer.advance(elapsed);
        timer.phase()
    }

    /// Eased rise progress in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self, elapsed: Duration) -> f32 {
        match self.phase(elapsed) {
            AnimPhase::Pending => 0.0,
            AnimPhase::Running { progress } => ease_out_cubic(progress),
            AnimPhase::Completed => 1.0,
        }
    }
}

/// Split `text` into glyphs with a [`GLYPH_STEP`] stagger.
#[must_use]
pub fn animate(text: &str) -> Vec<GlyphDescriptor> {
    animate_with_step(text, GLYPH_STEP)
}

/// Split `text` into glyphs, each starting `step` after the previous one.
///
/// Glyphs are grapheme clusters, so `"NÓS"` yields three descriptors whether
/// the accent is precomposed or combining.
#[must_use]
pub fn animate_with_step(text: &str, step: Duration) -> Vec<GlyphDescriptor> {
    text.graphemes(true)
        .enumerate()
        .map(|(index, glyph)| GlyphDescriptor {
            glyph: glyph.to_string(),
            index,
            delay: step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX)),
            width: if glyph.chars().all(char::is_whitespace) {
                GlyphWidth::Cells(1)
            } else {
                GlyphWidth::Natural
            },
        })
        .collect()
}
