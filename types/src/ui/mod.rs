//! UI state types for the storefront surface.
//!
//! Pure data types with no IO, no async, no ratatui dependency.
//! Used by both the engine (state ownership) and tui (rendering/input).

mod animation;
mod glyph;
mod marquee;
mod options;
mod overlay;
mod reveal;

pub use animation::{AnimPhase, EffectTimer, ease_out_cubic};
pub use glyph::{GLYPH_RISE, GLYPH_STEP, GlyphDescriptor, GlyphWidth, animate, animate_with_step};
pub use marquee::{MarqueeDirection, MarqueeEffect};
pub use options::UiOptions;
pub use overlay::{OverlayEvent, OverlayState};
pub use reveal::{AnchorId, RevealAnchor};
