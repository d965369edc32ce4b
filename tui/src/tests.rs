use std::time::{Duration, Instant};

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use insta::assert_snapshot;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use vitrine_engine::{
    AnchorId, NavigationSettings, OverlayState, Storefront, UiOptions, VitrineConfig,
};

use super::{ClickTarget, Command, HitMap, apply, draw, map_mouse, report_visibility};

fn shop_with(options: UiOptions, now: Instant) -> Storefront {
    let settings = NavigationSettings {
        options,
        ..NavigationSettings::default()
    };
    Storefront::with_parts(VitrineConfig::catalog_products(None), settings, now)
}

fn render(shop: &Storefront, width: u16, height: u16) -> (Buffer, HitMap) {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
    let mut hits = HitMap::default();
    terminal.draw(|frame| hits = draw(frame, shop)).expect("draw");
    (terminal.backend().buffer().clone(), hits)
}

fn row(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf[(x, y)].symbol().to_string())
        .collect()
}

fn screen(buf: &Buffer) -> String {
    (0..buf.area.height)
        .map(|y| row(buf, y))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rows of `panel`, trimmed on the right and prefixed with their screen row.
fn panel_rows(buf: &Buffer, panel: Rect) -> String {
    (panel.y..panel.bottom())
        .map(|y| {
            let text: String = (panel.x..panel.right())
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect();
            format!("{y:02}|{}", text.trim_end())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn left_click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Draw, report visibility, wait out the reveal delay and draw again.
fn reveal_header(shop: &mut Storefront, start: Instant, width: u16, height: u16) {
    let (_, hits) = render(shop, width, height);
    report_visibility(shop, &hits, start);
    shop.tick(start + Duration::from_millis(2500));
}

#[test]
fn header_is_hidden_until_revealed() {
    let start = Instant::now();
    let mut shop = shop_with(UiOptions::default(), start);

    let (buf, hits) = render(&shop, 80, 24);
    let header = row(&buf, 1);
    assert!(header.contains("VITRINE"));
    assert!(!header.contains("SHOP"));
    assert!(!header.contains('≡'));
    assert_eq!(hits.target_at(hits.icons.visible.x + 1, 1), ClickTarget::MenuIcon);

    report_visibility(&mut shop, &hits, start);
    shop.tick(start + Duration::from_millis(2499));
    let (buf, _) = render(&shop, 80, 24);
    assert!(!row(&buf, 1).contains("SHOP"));

    shop.tick(start + Duration::from_millis(2500));
    let (buf, hits) = render(&shop, 80, 24);
    let header = row(&buf, 1);
    assert!(header.contains("SOBRE NÓS"), "{header}");
    assert!(header.contains("SHOP ↗"), "{header}");
    assert!(header.contains("CONTATO"), "{header}");
    assert!(header.contains('≡'));
    assert!(header.contains('⊞'));
    assert_eq!(hits.target_at(hits.menu_icon.x, 1), ClickTarget::MenuIcon);
    assert_eq!(hits.target_at(hits.cart_icon.x, 1), ClickTarget::CartIcon);
}

#[test]
fn hidden_icons_still_take_clicks() {
    let start = Instant::now();
    let mut shop = shop_with(UiOptions::default(), start);

    let (buf, hits) = render(&shop, 80, 24);
    assert!(!row(&buf, 1).contains('⊞'));
    assert_eq!(hits.target_at(hits.cart_icon.x, 1), ClickTarget::CartIcon);

    let command = map_mouse(left_click(hits.cart_icon.x, 1), &hits);
    assert_eq!(command, Some(Command::ToggleCart));
    assert!(!apply(&mut shop, Command::ToggleCart));
    assert_eq!(shop.navigation().overlay(), OverlayState::CartOpen);

    let (_, hits) = render(&shop, 80, 24);
    let command = map_mouse(left_click(hits.menu_icon.x, 1), &hits);
    assert_eq!(command, Some(Command::ToggleMenu));
    apply(&mut shop, Command::ToggleMenu);
    assert_eq!(shop.navigation().overlay(), OverlayState::MenuOpen);
}

#[test]
fn narrow_terminal_reveals_icons_but_not_links() {
    let start = Instant::now();
    let mut shop = shop_with(UiOptions::default(), start);
    reveal_header(&mut shop, start, 12, 10);

    assert!(shop.navigation().is_revealed(AnchorId::NavIcons));
    assert!(!shop.navigation().is_revealed(AnchorId::NavLinks));
    let observed: Vec<_> = shop.navigation().observed_anchors().collect();
    assert_eq!(observed, vec![AnchorId::NavLinks]);
}

#[test]
fn anchors_are_reported_once() {
    let start = Instant::now();
    let mut shop = shop_with(UiOptions::default(), start);
    let (_, hits) = render(&shop, 80, 24);
    report_visibility(&mut shop, &hits, start);
    assert_eq!(shop.navigation().pending_reveals(), 2);
    assert_eq!(shop.navigation().observed_anchors().count(), 0);

    // A second report has nothing left to observe.
    report_visibility(&mut shop, &hits, start + Duration::from_millis(100));
    assert_eq!(shop.navigation().pending_reveals(), 2);
}

#[test]
fn empty_cart_overlay() {
    let start = Instant::now();
    let mut shop = shop_with(UiOptions::default(), start);
    reveal_header(&mut shop, start, 80, 24);
    shop.navigation_mut().toggle_cart();

    let (buf, hits) = render(&shop, 80, 24);
    let text = screen(&buf);
    assert!(text.contains("Seu carrinho está vazio."));
    assert!(text.contains("[ Confira o que há de melhor. ]"));
    assert!(text.contains("CARRINHO"));
    assert!(text.contains("VAZIO"));
    assert!(row(&buf, 1).contains('✕'));
    assert!(row(&buf, 23).contains("⊘ scroll"));

    let button = hits.panel_button.expect("empty cart button");
    assert_eq!(hits.target_at(button.x, button.y), ClickTarget::PanelButton);
    let backdrop = hits.backdrop.expect("backdrop");
    assert_eq!(hits.target_at(backdrop.x, backdrop.y), ClickTarget::Backdrop);

    assert_snapshot!(panel_rows(&buf, hits.panel.expect("panel")), @r"
    04|                          Seu carrinho está vazio.
    05|
    06|                      [ Confira o que há de melhor. ]
    07|
    08|
    09|
    10|
    11|
    12|
    13|
    14|
    15|
    16|
    17|
    18|────────────────────────────────────────────────────────────────────────────
    19|CARRINHO CARRINHO CARRINHO CARRINHO CARRINHO CARRINHO CARRINHO CARRINHO CARR
    20|────────────────────────────────────────────────────────────────────────────
    21|VAZIO VAZIO VAZIO VAZIO VAZIO VAZIO VAZIO VAZIO VAZIO VAZIO VAZIO VAZIO VAZI
    ");
}

#[test]
fn itemized_cart_overlay() {
    let start = Instant::now();
    let mut shop = shop_with(UiOptions::default(), start);
    shop.add_product(0);
    shop.add_product(0);
    shop.add_product(3);
    shop.navigation_mut().toggle_cart();

    let (buf, hits) = render(&shop, 80, 24);
    let text = screen(&buf);
    assert!(text.contains("Camiseta Oversized"));
    assert!(text.contains("Quantity: 2"));
    assert!(text.contains("Ecobag"));
    assert!(text.contains("Total:"));
    assert!(text.contains("$214.70"), "{text}");
    assert!(text.contains("[ Checkout ]"));
    assert!(!text.contains("CARRINHO"));
    assert!(hits.panel_button.is_some());

    assert_snapshot!(panel_rows(&buf, hits.panel.expect("panel")), @r"
    04|Camiseta Oversized                                                    $89.90
    05|Quantity: 2
    06|
    07|Ecobag                                                                $34.90
    08|Quantity: 1
    09|
    10|
    11|
    12|
    13|
    14|
    15|
    16|
    17|
    18|
    19|────────────────────────────────────────────────────────────────────────────
    20|Total:                                                               $214.70
    21|                                [ Checkout ]
    ");
}

#[test]
fn catalog_shows_quantities_and_badge() {
    let start = Instant::now();
    let mut shop = shop_with(UiOptions::default(), start);
    reveal_header(&mut shop, start, 80, 24);
    shop.add_product(1);

    let (buf, hits) = render(&shop, 80, 24);
    let text = screen(&buf);
    assert!(text.contains("CATÁLOGO"));
    assert!(text.contains("2  Boné Dad Hat  (x1)"), "{text}");
    assert!(text.contains("$59.90"));
    assert!(row(&buf, 1).contains('●'));
    assert!(hits.backdrop.is_none());
    assert!(!row(&buf, 23).contains("⊘ scroll"));
}

#[test]
fn menu_overlay_with_reduced_motion_is_settled() {
    let start = Instant::now();
    let options = UiOptions {
        reduced_motion: true,
        ascii_only: true,
    };
    let mut shop = shop_with(options, start);
    shop.navigation_mut().toggle_menu();

    let (buf, hits) = render(&shop, 80, 24);
    let text = screen(&buf);
    assert!(text.contains("FAQ"));
    assert!(text.contains("Instagram"));
    assert!(text.contains("Careers"));
    assert!(text.contains("SHOP ^"), "{text}");
    assert!(text.contains("CONTATO"));
    assert!(text.contains("SOBRE NÓS"));
    assert!(row(&buf, 23).contains("[locked]"));
    assert!(hits.panel_button.is_none());

    assert_snapshot!(panel_rows(&buf, hits.panel.expect("panel")), @r"
    04|Connect With  FAQ           Get Started   SHOP ^
    05|Us
    06|              Saiba mais    Careers
    07|Instagram     sobre                       CONTATO
    08|Facebook      Sobre isso
    09|Twitter       E sobre isso
    10|Snapchat                                  SOBRE NÓS
    11|
    12|
    13|
    14|
    15|
    16|
    17|
    18|
    19|
    20|
    21|
    ");
}

#[test]
fn menu_labels_rise_over_time() {
    let start = Instant::now();
    let mut shop = shop_with(UiOptions::default(), start);
    shop.navigation_mut().toggle_menu();

    let (buf, _) = render(&shop, 80, 24);
    assert!(!screen(&buf).contains("SHOP"));

    shop.tick(start + Duration::from_secs(1));
    let (buf, _) = render(&shop, 80, 24);
    let text = screen(&buf);
    assert!(text.contains("SHOP ↗"), "{text}");
    assert!(text.contains("SOBRE NÓS"));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let start = Instant::now();
    let mut shop = shop_with(UiOptions::default(), start);
    shop.navigation_mut().toggle_cart();
    let (_, hits) = render(&shop, 4, 3);
    assert!(hits.panel_button.is_none());
    shop.navigation_mut().toggle_menu();
    let _ = render(&shop, 1, 1);
}
