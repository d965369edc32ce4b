//! Input handling for the Vitrine TUI.

use anyhow::{Result, anyhow};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::debug;

use vitrine_engine::{PanelAction, Storefront};

use crate::layout::{ClickTarget, HitMap};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 256;
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering
const PAGE_SCROLL: isize = 5;

/// What a key press or click asks the storefront to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleCart,
    ToggleMenu,
    CloseBackdrop,
    ActivatePanel,
    /// Zero-based catalog index.
    AddProduct(usize),
    RemoveLast,
    ClearCart,
    Scroll(isize),
    Quit,
}

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads terminal events on a blocking thread and queues them for the frame loop.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        self.rx.close();
        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Command::Quit);
    }
    let command = match key.code {
        KeyCode::Char('c') => Command::ToggleCart,
        KeyCode::Char('m') => Command::ToggleMenu,
        KeyCode::Esc => Command::CloseBackdrop,
        KeyCode::Enter => Command::ActivatePanel,
        KeyCode::Char(digit @ '1'..='9') => Command::AddProduct(usize::from(digit as u8 - b'1')),
        KeyCode::Char('-') => Command::RemoveLast,
        KeyCode::Char('x') => Command::ClearCart,
        KeyCode::Up | KeyCode::Char('k') => Command::Scroll(-1),
        KeyCode::Down | KeyCode::Char('j') => Command::Scroll(1),
        KeyCode::PageUp => Command::Scroll(-PAGE_SCROLL),
        KeyCode::PageDown => Command::Scroll(PAGE_SCROLL),
        KeyCode::Char('q') => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Map a mouse event against the geometry of the last frame.
#[must_use]
pub fn map_mouse(mouse: MouseEvent, hits: &HitMap) -> Option<Command> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            match hits.target_at(mouse.column, mouse.row) {
                ClickTarget::MenuIcon => Some(Command::ToggleMenu),
                ClickTarget::CartIcon => Some(Command::ToggleCart),
                ClickTarget::PanelButton => Some(Command::ActivatePanel),
                ClickTarget::Backdrop => Some(Command::CloseBackdrop),
                ClickTarget::Panel | ClickTarget::Page => None,
            }
        }
        MouseEventKind::ScrollUp => Some(Command::Scroll(-1)),
        MouseEventKind::ScrollDown => Some(Command::Scroll(1)),
        _ => None,
    }
}

/// Apply one command. Returns `true` when the user asked to quit.
pub fn apply(shop: &mut Storefront, command: Command) -> bool {
    match command {
        Command::ToggleCart => {
            shop.navigation_mut().toggle_cart();
        }
        Command::ToggleMenu => {
            shop.navigation_mut().toggle_menu();
        }
        Command::CloseBackdrop => {
            shop.navigation_mut().close_via_backdrop();
        }
        Command::ActivatePanel => {
            if let Some(action) = shop.navigation_mut().activate_panel_action() {
                debug!(?action, "Panel button pressed");
                if action == PanelAction::ContinueShopping {
                    shop.scroll_catalog(-isize::MAX);
                }
            }
        }
        Command::AddProduct(index) => {
            shop.add_product(index);
        }
        Command::RemoveLast => {
            shop.remove_last_unit();
        }
        Command::ClearCart => shop.clear_cart(),
        Command::Scroll(delta) => {
            shop.scroll_catalog(delta);
        }
        Command::Quit => return true,
    }
    false
}

/// Process queued input events.
/// Returns `true` if the app should quit.
pub fn handle_events(shop: &mut Storefront, input: &mut InputPump, hits: &HitMap) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };
        processed += 1;

        let command = match ev {
            Event::Key(key) => map_key(key),
            Event::Mouse(mouse) => map_mouse(mouse, hits),
            _ => None,
        };
        if let Some(command) = command
            && apply(shop, command)
        {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::{Command, apply, map_key, map_mouse};
    use crate::layout::HitMap;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::layout::Rect;
    use std::time::Instant;
    use vitrine_engine::{NavigationSettings, OverlayState, Storefront, VitrineConfig};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn shop() -> Storefront {
        Storefront::with_parts(
            VitrineConfig::catalog_products(None),
            NavigationSettings::default(),
            Instant::now(),
        )
    }

    #[test]
    fn key_bindings() {
        assert_eq!(map_key(key(KeyCode::Char('c'))), Some(Command::ToggleCart));
        assert_eq!(map_key(key(KeyCode::Char('m'))), Some(Command::ToggleMenu));
        assert_eq!(map_key(key(KeyCode::Esc)), Some(Command::CloseBackdrop));
        assert_eq!(map_key(key(KeyCode::Enter)), Some(Command::ActivatePanel));
        assert_eq!(map_key(key(KeyCode::Char('1'))), Some(Command::AddProduct(0)));
        assert_eq!(map_key(key(KeyCode::Char('9'))), Some(Command::AddProduct(8)));
        assert_eq!(map_key(key(KeyCode::Char('0'))), None);
        assert_eq!(map_key(key(KeyCode::Char('-'))), Some(Command::RemoveLast));
        assert_eq!(map_key(key(KeyCode::Down)), Some(Command::Scroll(1)));
        assert_eq!(map_key(key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut release = key(KeyCode::Char('c'));
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }

    #[test]
    fn clicks_follow_hit_map() {
        let hits = HitMap {
            viewport: Rect::new(0, 0, 80, 24),
            menu_icon: Rect::new(72, 1, 3, 1),
            cart_icon: Rect::new(75, 1, 4, 1),
            backdrop: Some(Rect::new(0, 3, 80, 20)),
            panel: Some(Rect::new(2, 4, 76, 18)),
            panel_button: Some(Rect::new(25, 6, 30, 1)),
            ..HitMap::default()
        };
        assert_eq!(map_mouse(click(73, 1), &hits), Some(Command::ToggleMenu));
        assert_eq!(map_mouse(click(76, 1), &hits), Some(Command::ToggleCart));
        assert_eq!(map_mouse(click(30, 6), &hits), Some(Command::ActivatePanel));
        assert_eq!(map_mouse(click(0, 10), &hits), Some(Command::CloseBackdrop));
        assert_eq!(map_mouse(click(10, 10), &hits), None);

        let scroll = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            ..click(0, 0)
        };
        assert_eq!(map_mouse(scroll, &hits), Some(Command::Scroll(1)));
    }

    #[test]
    fn apply_drives_overlay_and_cart() {
        let mut shop = shop();
        assert!(!apply(&mut shop, Command::AddProduct(0)));
        assert!(!apply(&mut shop, Command::ToggleCart));
        assert_eq!(shop.navigation().overlay(), OverlayState::CartOpen);

        // Cart switches to menu without passing through closed.
        apply(&mut shop, Command::ToggleMenu);
        assert_eq!(shop.navigation().overlay(), OverlayState::MenuOpen);
        assert!(shop.page_locked());

        apply(&mut shop, Command::CloseBackdrop);
        assert_eq!(shop.navigation().overlay(), OverlayState::Closed);
        assert!(!shop.page_locked());

        apply(&mut shop, Command::ClearCart);
        assert!(shop.cart().is_empty());
        assert!(apply(&mut shop, Command::Quit));
    }

    #[test]
    fn panel_button_checks_out_or_continues() {
        let mut shop = shop();
        apply(&mut shop, Command::ToggleCart);
        apply(&mut shop, Command::ActivatePanel);
        assert_eq!(shop.navigation().overlay(), OverlayState::Closed);
        assert!(shop.notice().is_none());

        apply(&mut shop, Command::AddProduct(2));
        apply(&mut shop, Command::ToggleCart);
        apply(&mut shop, Command::ActivatePanel);
        assert_eq!(shop.navigation().overlay(), OverlayState::Closed);
        let notice = shop.notice().expect("checkout notice");
        assert!(notice.starts_with("Checkout: 1 item(s)"), "{notice}");
    }

    #[test]
    fn scrolling_is_ignored_while_locked() {
        let mut shop = shop();
        apply(&mut shop, Command::Scroll(1));
        assert_eq!(shop.catalog_offset(), 1);
        apply(&mut shop, Command::ToggleMenu);
        apply(&mut shop, Command::Scroll(1));
        assert_eq!(shop.catalog_offset(), 1);
    }
}
