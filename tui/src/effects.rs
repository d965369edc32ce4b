//! Text entrance effects for menu labels.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use unicode_width::UnicodeWidthStr;

use vitrine_engine::AnimatedLabel;
use vitrine_types::ui::{GlyphDescriptor, GlyphWidth};

/// Rows a glyph travels while rising into place.
pub const RISE_ROWS: u16 = 1;

fn glyph_cells(glyph: &GlyphDescriptor) -> u16 {
    match glyph.width {
        GlyphWidth::Cells(cells) => cells,
        GlyphWidth::Natural => glyph.glyph.width() as u16,
    }
}

/// Rows below the resting line for a glyph at `progress`.
fn rise_offset(progress: f32) -> u16 {
    ((1.0 - progress.clamp(0.0, 1.0)) * f32::from(RISE_ROWS)).round() as u16
}

/// Draw `label` with each glyph rising from below its resting row.
///
/// The resting row is `area.y`. Glyphs that have not started are not drawn;
/// glyphs in the first half of their rise are dimmed.
pub fn draw_rising_label(
    buf: &mut Buffer,
    area: Rect,
    label: &AnimatedLabel,
    style: Style,
    arrow: &str,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let right = area.x.saturating_add(area.width);
    let mut x = area.x;
    for glyph in &label.glyphs {
        let cells = glyph_cells(glyph);
        if x.saturating_add(cells) > right {
            return;
        }
        let progress = glyph.progress(label.elapsed);
        if progress > 0.0 && glyph.width == GlyphWidth::Natural {
            let offset = rise_offset(progress);
            if offset < area.height {
                let glyph_style = if progress < 0.5 {
                    style.add_modifier(Modifier::DIM)
                } else {
                    style
                };
                buf.set_string(x, area.y + offset, &glyph.glyph, glyph_style);
            }
        }
        x = x.saturating_add(cells);
    }

    if label.link.arrow && label.is_settled() {
        let x = x.saturating_add(1);
        if x.saturating_add(arrow.width() as u16) <= right {
            buf.set_string(x, area.y, arrow, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{draw_rising_label, rise_offset};
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::Style;
    use std::time::Duration;
    use vitrine_engine::{AnimatedLabel, MENU_LINKS};
    use vitrine_types::ui::GLYPH_STEP;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn offset_shrinks_as_glyph_rises() {
        assert_eq!(rise_offset(0.0), 1);
        assert_eq!(rise_offset(0.4), 1);
        assert_eq!(rise_offset(0.6), 0);
        assert_eq!(rise_offset(1.0), 0);
    }

    #[test]
    fn settled_label_sits_on_resting_row() {
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        let label = AnimatedLabel::new(MENU_LINKS[0], GLYPH_STEP, Duration::from_secs(1));
        draw_rising_label(&mut buf, area, &label, Style::default(), "^");
        assert_eq!(row(&buf, 0), "SHOP ^    ");
        assert_eq!(row(&buf, 1), "          ");
    }

    #[test]
    fn unstarted_glyphs_are_hidden() {
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        // At 120ms S, H and O are rising; P starts at 150ms.
        let label = AnimatedLabel::new(MENU_LINKS[0], GLYPH_STEP, Duration::from_millis(120));
        draw_rising_label(&mut buf, area, &label, Style::default(), "^");
        let top = row(&buf, 0);
        let bottom = row(&buf, 1);
        assert!(!top.contains('P') && !bottom.contains('P'));
        // No arrow until settled.
        assert!(!top.contains('^'));
    }

    #[test]
    fn space_keeps_its_cell() {
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        let label = AnimatedLabel::new(MENU_LINKS[2], GLYPH_STEP, Duration::from_secs(2));
        draw_rising_label(&mut buf, area, &label, Style::default(), "^");
        assert_eq!(row(&buf, 0), "SOBRE NÓS   ");
    }

    #[test]
    fn narrow_area_truncates() {
        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        let label = AnimatedLabel::new(MENU_LINKS[1], GLYPH_STEP, Duration::from_secs(2));
        draw_rising_label(&mut buf, area, &label, Style::default(), "^");
        assert_eq!(row(&buf, 0), "CON");
    }
}
