//! TUI rendering for Vitrine using ratatui.

mod effects;
mod input;
mod layout;
mod theme;

pub use input::{Command, InputPump, apply, handle_events, map_key, map_mouse};
pub use layout::{
    AnchorGeometry, ClickTarget, HEADER_HEIGHT, HitMap, ICON_HIT_WIDTH, STATUS_HEIGHT,
    report_visibility,
};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use vitrine_engine::{
    CartIcon, CartView, EmptyCartView, HeaderView, MenuView, NavLink, OverlayView, Storefront,
    TOTAL_LABEL,
};

const BRAND: &str = "VITRINE";
const LINK_GAP: u16 = 3;
const LABEL_ROWS: u16 = 1 + effects::RISE_ROWS;

/// Draw one frame of the storefront and return the geometry it produced.
pub fn draw(frame: &mut Frame, shop: &Storefront) -> HitMap {
    let options = shop.navigation().settings().options;
    let palette = palette();
    let glyphs = glyphs(options);
    let view = shop.navigation().view();

    let area = frame.area();
    frame.render_widget(Block::default().style(styles::page(&palette)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    let mut hits = HitMap {
        viewport: area,
        ..HitMap::default()
    };

    draw_catalog(frame, shop, chunks[1], &palette);

    if !matches!(view.overlay, OverlayView::Closed) {
        let backdrop = chunks[1];
        frame.render_widget(Clear, backdrop);
        frame.render_widget(Block::default().style(styles::overlay(&palette)), backdrop);
        let panel = backdrop.inner(Margin {
            horizontal: 2,
            vertical: 1,
        });
        hits.backdrop = Some(backdrop);
        hits.panel = Some(panel);
        hits.panel_button = match &view.overlay {
            OverlayView::Closed => None,
            OverlayView::EmptyCart(empty) => {
                draw_empty_cart(frame.buffer_mut(), panel, empty, &palette)
            }
            OverlayView::Cart(cart) => draw_cart(frame, panel, cart, &palette),
            OverlayView::Menu(menu) => {
                draw_menu(frame, panel, menu, &palette, &glyphs);
                None
            }
        };
    }

    draw_header(frame.buffer_mut(), chunks[0], &view.header, &palette, &glyphs, &mut hits);
    draw_status_bar(frame, shop, chunks[2], view.scroll_locked, &palette, &glyphs);
    hits
}

fn nav_links_width(links: &[NavLink], glyphs: &Glyphs) -> u16 {
    let text: u16 = links
        .iter()
        .map(|link| {
            let arrow = if link.arrow {
                1 + glyphs.arrow_up_right.width() as u16
            } else {
                0
            };
            link.text.width() as u16 + arrow
        })
        .sum();
    let gaps = LINK_GAP * (links.len().saturating_sub(1) as u16);
    text + gaps
}

/// Draw `text` starting at a column that may lie left of `clip`.
fn draw_clipped(buf: &mut Buffer, x: i32, y: u16, text: &str, style: Style, clip: Rect) -> i32 {
    let mut cursor = x;
    let left = i32::from(clip.x);
    let right = i32::from(clip.right());
    for grapheme in text.graphemes(true) {
        let cells = grapheme.width() as i32;
        if cursor >= left && cursor + cells <= right {
            buf.set_string(cursor as u16, y, grapheme, style);
        }
        cursor += cells;
    }
    cursor
}

fn draw_header(
    buf: &mut Buffer,
    area: Rect,
    header: &HeaderView,
    palette: &Palette,
    glyphs: &Glyphs,
    hits: &mut HitMap,
) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let base = if header.links_inverted {
        styles::overlay(palette)
    } else {
        styles::page(palette)
    };
    buf.set_style(area, base);

    let row = area.y + area.height / 2;
    let link_style = styles::header_item(palette, header.links_inverted);
    let icon_style = styles::header_item(palette, header.icons_inverted);

    draw_clipped(buf, i32::from(area.x) + 2, row, BRAND, link_style, area);

    let icons_width = 2 * ICON_HIT_WIDTH + 1;
    let icons_x = i32::from(area.right()) - 1 - i32::from(icons_width);
    let links_width = nav_links_width(header.links, glyphs);
    let links_x = icons_x - i32::from(LINK_GAP) - i32::from(links_width);

    hits.links = AnchorGeometry::place(links_x, row, links_width, 1, area);
    hits.icons = AnchorGeometry::place(icons_x, row, icons_width, 1, area);

    if header.links_visible {
        let mut x = links_x;
        for link in header.links {
            x = draw_clipped(buf, x, row, link.text, link_style, area);
            if link.arrow {
                x = draw_clipped(buf, x + 1, row, glyphs.arrow_up_right, link_style, area);
            }
            x += i32::from(LINK_GAP);
        }
    }

    // Icon hit boxes exist even while the icons are hidden.
    hits.menu_icon = AnchorGeometry::place(icons_x, row, ICON_HIT_WIDTH, 1, area).visible;
    hits.cart_icon = AnchorGeometry::place(
        icons_x + i32::from(ICON_HIT_WIDTH),
        row,
        ICON_HIT_WIDTH + 1,
        1,
        area,
    )
    .visible;

    if header.icons_visible {
        buf.set_style(hits.icons.visible, icon_style);
        let menu_style = if header.menu_active {
            icon_style.add_modifier(Modifier::REVERSED)
        } else {
            icon_style
        };
        draw_clipped(buf, icons_x + 1, row, glyphs.menu, menu_style, area);
        let cart = match header.cart_icon {
            CartIcon::Cart => glyphs.cart,
            CartIcon::Close => glyphs.close,
        };
        let cart_x = icons_x + i32::from(ICON_HIT_WIDTH) + 1;
        draw_clipped(buf, cart_x, row, cart, icon_style, area);
        if header.cart_badge {
            let badge_style = icon_style.fg(palette.badge);
            draw_clipped(buf, cart_x + 1, row, glyphs.badge, badge_style, area);
        }
    }

    if header.menu_active && area.height > 1 {
        let rule = "─".repeat(usize::from(area.width));
        buf.set_stringn(
            area.x,
            area.bottom() - 1,
            rule,
            usize::from(area.width),
            Style::default().fg(palette.accent),
        );
    }
}

fn draw_catalog(frame: &mut Frame, shop: &Storefront, area: Rect, palette: &Palette) {
    if area.height == 0 {
        return;
    }
    let inner = area.inner(Margin {
        horizontal: 2,
        vertical: 1,
    });
    let width = usize::from(inner.width);
    let mut lines = vec![
        Line::from(Span::styled(
            "CATÁLOGO",
            styles::page(palette).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    for (index, product) in shop
        .catalog()
        .iter()
        .enumerate()
        .skip(shop.catalog_offset())
    {
        let left = match shop.cart().quantity_of(product.name.as_str()) {
            Some(quantity) => format!("{}  {}  (x{quantity})", index + 1, product.name),
            None => format!("{}  {}", index + 1, product.name),
        };
        lines.push(spread(
            left,
            product.price.to_string(),
            width,
            styles::page(palette),
            styles::page(palette).add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

/// A line with `left` flush left and `right` flush right within `width`.
fn spread(
    left: String,
    right: String,
    width: usize,
    left_style: Style,
    right_style: Style,
) -> Line<'static> {
    let gap = width
        .saturating_sub(left.width())
        .saturating_sub(right.width())
        .max(1);
    Line::from(vec![
        Span::styled(left, left_style),
        Span::raw(" ".repeat(gap)),
        Span::styled(right, right_style),
    ])
}

/// Centered button on `row`; returns its rect.
fn draw_button(buf: &mut Buffer, panel: Rect, row: u16, text: &str, palette: &Palette) -> Rect {
    let label = format!("[ {text} ]");
    let width = (label.width() as u16).min(panel.width);
    let x = panel.x + (panel.width - width) / 2;
    buf.set_stringn(x, row, &label, usize::from(width), styles::button(palette));
    Rect::new(x, row, width, 1)
}

fn draw_empty_cart(
    buf: &mut Buffer,
    panel: Rect,
    empty: &EmptyCartView<'_>,
    palette: &Palette,
) -> Option<Rect> {
    if panel.height < 3 || panel.width == 0 {
        return None;
    }
    let heading_style = styles::overlay(palette).add_modifier(Modifier::BOLD);
    let heading_width = (empty.heading.width() as u16).min(panel.width);
    buf.set_stringn(
        panel.x + (panel.width - heading_width) / 2,
        panel.y,
        empty.heading,
        usize::from(panel.width),
        heading_style,
    );
    let button = draw_button(buf, panel, panel.y + 2, empty.button, palette);

    // Two scrolling bands framed by rules at the bottom of the panel.
    let band_rows = 2 * empty.marquees.len() as u16;
    if panel.height >= band_rows + 5 {
        let width = usize::from(panel.width);
        let rule = "─".repeat(width);
        let mut y = panel.bottom() - band_rows;
        for marquee in empty.marquees {
            buf.set_stringn(panel.x, y, &rule, width, Style::default().fg(palette.rule));
            buf.set_stringn(
                panel.x,
                y + 1,
                marquee.window(width),
                width,
                styles::overlay(palette).add_modifier(Modifier::BOLD),
            );
            y += 2;
        }
    }
    Some(button)
}

fn draw_cart(frame: &mut Frame, panel: Rect, cart: &CartView, palette: &Palette) -> Option<Rect> {
    if panel.height < 4 || panel.width == 0 {
        return None;
    }
    let width = usize::from(panel.width);
    let overlay = styles::overlay(palette);
    let bold = overlay.add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    for item in &cart.cart.items {
        lines.push(spread(
            item.name().to_string(),
            item.price().to_string(),
            width,
            bold,
            overlay,
        ));
        lines.push(Line::from(Span::styled(
            format!("Quantity: {}", item.quantity()),
            styles::muted(palette),
        )));
        lines.push(Line::default());
    }
    let list = Rect {
        height: panel.height - 3,
        ..panel
    };
    frame.render_widget(Paragraph::new(lines).style(overlay), list);

    let total_row = panel.bottom() - 3;
    let rule = "─".repeat(width);
    let buf = frame.buffer_mut();
    buf.set_stringn(panel.x, total_row, &rule, width, Style::default().fg(palette.rule));
    buf.set_line(
        panel.x,
        total_row + 1,
        &spread(
            TOTAL_LABEL.to_string(),
            cart.cart.total.to_string(),
            width,
            bold,
            bold,
        ),
        panel.width,
    );
    Some(draw_button(buf, panel, panel.bottom() - 1, cart.checkout, palette))
}

fn draw_menu(frame: &mut Frame, panel: Rect, menu: &MenuView, palette: &Palette, glyphs: &Glyphs) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(panel);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Ratio(1, menu.groups.len().max(1) as u32);
            menu.groups.len()
        ])
        .split(halves[0]);
    for (group, column) in menu.groups.iter().zip(columns.iter()) {
        let mut lines = vec![
            Line::from(Span::styled(
                group.title,
                styles::muted(palette).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];
        lines.extend(
            group
                .links
                .iter()
                .map(|link| Line::from(Span::styled(*link, styles::overlay(palette)))),
        );
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), *column);
    }

    let labels = halves[1];
    let label_style = styles::overlay(palette).add_modifier(Modifier::BOLD);
    let buf = frame.buffer_mut();
    for (index, label) in menu.labels.iter().enumerate() {
        let y = labels.y + (index as u16) * (LABEL_ROWS + 1);
        if y + LABEL_ROWS > labels.bottom() {
            break;
        }
        let area = Rect::new(labels.x, y, labels.width, LABEL_ROWS);
        effects::draw_rising_label(buf, area, label, label_style, glyphs.arrow_up_right);
    }
}

fn draw_status_bar(
    frame: &mut Frame,
    shop: &Storefront,
    area: Rect,
    scroll_locked: bool,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    if area.height == 0 {
        return;
    }
    let muted = styles::muted(palette);
    let mut spans = vec![Span::styled(
        " c cart  m menu  1-9 add  - remove  x clear  ↑↓ scroll  q quit",
        muted,
    )];
    if let Some(notice) = shop.notice() {
        spans.push(Span::styled("  │  ", muted));
        spans.push(Span::styled(notice, styles::page(palette)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    if scroll_locked {
        let width = glyphs.locked.width() as u16;
        if width < area.width {
            frame.buffer_mut().set_string(
                area.right() - width - 1,
                area.y,
                glyphs.locked,
                Style::default().fg(palette.accent),
            );
        }
    }
}

#[cfg(test)]
mod tests;
