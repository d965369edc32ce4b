//! Color theme and glyphs for the Vitrine TUI.
//!
//! Monochrome storefront look: ink on paper for the page, paper on ink while an
//! overlay covers it.

use ratatui::style::{Color, Modifier, Style};

use vitrine_types::ui::UiOptions;

mod colors {
    use super::Color;

    pub const PAPER: Color = Color::Rgb(244, 242, 238);
    pub const INK: Color = Color::Rgb(17, 17, 17);
    pub const OVERLAY: Color = Color::Rgb(12, 12, 12);
    pub const ZINC: Color = Color::Rgb(212, 212, 216); // zinc-300
    pub const MUTED: Color = Color::Rgb(113, 113, 122); // zinc-500
    pub const BADGE: Color = Color::Rgb(34, 197, 94); // green dot on the cart icon
    pub const ACCENT: Color = Color::Rgb(250, 204, 21);
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub page_bg: Color,
    pub page_fg: Color,
    pub overlay_bg: Color,
    pub overlay_fg: Color,
    pub rule: Color,
    pub muted: Color,
    pub badge: Color,
    pub accent: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            page_bg: colors::PAPER,
            page_fg: colors::INK,
            overlay_bg: colors::OVERLAY,
            overlay_fg: colors::PAPER,
            rule: colors::ZINC,
            muted: colors::MUTED,
            badge: colors::BADGE,
            accent: colors::ACCENT,
        }
    }
}

#[must_use]
pub fn palette() -> Palette {
    Palette::standard()
}

/// ASCII/Unicode glyphs for header icons.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub menu: &'static str,
    pub cart: &'static str,
    pub close: &'static str,
    pub badge: &'static str,
    pub arrow_up_right: &'static str,
    pub locked: &'static str,
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            menu: "=",
            cart: "#",
            close: "x",
            badge: "*",
            arrow_up_right: "^",
            locked: "[locked]",
        }
    } else {
        Glyphs {
            menu: "≡",
            cart: "⊞",
            close: "✕",
            badge: "●",
            arrow_up_right: "↗",
            locked: "⊘ scroll",
        }
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn page(palette: &Palette) -> Style {
        Style::default().fg(palette.page_fg).bg(palette.page_bg)
    }

    #[must_use]
    pub fn overlay(palette: &Palette) -> Style {
        Style::default().fg(palette.overlay_fg).bg(palette.overlay_bg)
    }

    /// Header chrome; `inverted` when it sits over an open overlay.
    #[must_use]
    pub fn header_item(palette: &Palette, inverted: bool) -> Style {
        if inverted {
            overlay(palette).add_modifier(Modifier::BOLD)
        } else {
            page(palette).add_modifier(Modifier::BOLD)
        }
    }

    #[must_use]
    pub fn button(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.overlay_bg)
            .bg(palette.overlay_fg)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn muted(palette: &Palette) -> Style {
        Style::default().fg(palette.muted)
    }
}
