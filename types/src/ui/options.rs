/// Presentation switches resolved from config and environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiOptions {
    /// Skip glyph rises and freeze marquees.
    pub reduced_motion: bool,
    /// Use ASCII-only glyphs for icons.
    pub ascii_only: bool,
}
