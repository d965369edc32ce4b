//! Navigation controller: header chrome plus the cart and menu overlays.
//!
//! # Lifecycle
//!
//! ```text
//! mount() -> handle(event)* / advance(delta)* / tick(now)* -> teardown()
//! ```
//!
//! Every event goes through [`OverlayState::apply`] and is followed by
//! [`NavigationController::apply_side_effects`], which pushes the derived
//! scroll lock to the page. `teardown` (or dropping a mounted controller)
//! releases the scroll lock and cancels all reveal timers.

mod view;

pub use view::{
    AnimatedLabel, CHECKOUT_BUTTON, CartIcon, CartView, EMPTY_CART_BUTTON, EMPTY_CART_HEADING,
    EmptyCartView, HeaderView, LinkGroup, MENU_GROUPS, MENU_LINKS, MenuView, NAV_LINKS, NavLink,
    NavigationView, OverlayView, TOTAL_LABEL,
};

use std::fmt;
use std::time::{Duration, Instant};

use tracing::debug;

use vitrine_types::CartSnapshot;
use vitrine_types::ui::{
    AnchorId, GLYPH_STEP, MarqueeDirection, MarqueeEffect, OverlayEvent, OverlayState, UiOptions,
};

use crate::cart::CartStore;
use crate::reveal::{RevealSettings, VisibilityRevealer};
use crate::viewport::{IntersectionEntry, ScrollLock};

const MARQUEE_PERIOD: Duration = Duration::from_secs(100);

/// Resolved tunables for the navigation surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationSettings {
    pub reveal: RevealSettings,
    pub glyph_step: Duration,
    pub options: UiOptions,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            reveal: RevealSettings::default(),
            glyph_step: GLYPH_STEP,
            options: UiOptions::default(),
        }
    }
}

/// What a panel's primary button did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// "Confira o que há de melhor." on the empty cart: back to the catalog.
    ContinueShopping,
    Checkout,
}

type CheckoutHook = Box<dyn FnMut(&CartSnapshot)>;

pub struct NavigationController {
    cart: CartStore,
    overlay: OverlayState,
    scroll_lock: Box<dyn ScrollLock>,
    revealer: VisibilityRevealer,
    settings: NavigationSettings,
    menu_elapsed: Duration,
    marquees: [MarqueeEffect; 2],
    checkout_hook: Option<CheckoutHook>,
    mounted: bool,
}

fn empty_cart_marquees() -> [MarqueeEffect; 2] {
    [
        MarqueeEffect::new("CARRINHO", 6, MarqueeDirection::RightToLeft, MARQUEE_PERIOD),
        MarqueeEffect::new("VAZIO", 14, MarqueeDirection::LeftToRight, MARQUEE_PERIOD),
    ]
}

impl NavigationController {
    /// Mount the controller: start observing the header anchors and put the
    /// page in the unlocked state.
    pub fn mount(
        cart: CartStore,
        scroll_lock: impl ScrollLock + 'static,
        settings: NavigationSettings,
    ) -> Self {
        let controller = Self {
            cart,
            overlay: OverlayState::Closed,
            scroll_lock: Box::new(scroll_lock),
            revealer: VisibilityRevealer::mount(AnchorId::ALL, settings.reveal),
            settings,
            menu_elapsed: Duration::ZERO,
            marquees: empty_cart_marquees(),
            checkout_hook: None,
            mounted: true,
        };
        controller.apply_side_effects();
        debug!("Navigation mounted");
        controller
    }

    /// Called with a snapshot of the cart when the user checks out.
    pub fn set_checkout_hook(&mut self, hook: impl FnMut(&CartSnapshot) + 'static) {
        self.checkout_hook = Some(Box::new(hook));
    }

    #[must_use]
    pub fn overlay(&self) -> OverlayState {
        self.overlay
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Run one transition to completion. Events after teardown are ignored.
    pub fn handle(&mut self, event: OverlayEvent) -> OverlayState {
        if !self.mounted {
            return self.overlay;
        }
        let from = self.overlay;
        let to = from.apply(event);
        self.overlay = to;

        if from != to {
            match to {
                OverlayState::MenuOpen => self.menu_elapsed = Duration::ZERO,
                OverlayState::CartOpen => self.marquees = empty_cart_marquees(),
                OverlayState::Closed => {}
            }
            debug!(
                from = from.as_str(),
                to = to.as_str(),
                event = ?event,
                "Overlay transition"
            );
        }
        self.apply_side_effects();
        to
    }

    pub fn toggle_cart(&mut self) -> OverlayState {
        self.handle(OverlayEvent::ToggleCart)
    }

    pub fn toggle_menu(&mut self) -> OverlayState {
        self.handle(OverlayEvent::ToggleMenu)
    }

    pub fn close_via_backdrop(&mut self) -> OverlayState {
        self.handle(OverlayEvent::CloseViaBackdrop)
    }

    /// Press the open cart panel's button.
    ///
    /// On an empty cart this dismisses the panel; otherwise it checks out.
    /// Does nothing unless the cart panel is open.
    pub fn activate_panel_action(&mut self) -> Option<PanelAction> {
        if !self.mounted || !self.overlay.is_cart_open() {
            return None;
        }
        if self.cart.is_empty() {
            self.handle(OverlayEvent::CloseViaExplicitAction);
            return Some(PanelAction::ContinueShopping);
        }
        self.checkout().then_some(PanelAction::Checkout)
    }

    /// Hand the cart to the checkout hook and close the panel.
    ///
    /// Returns `false` when the cart panel is not open or the cart is empty.
    pub fn checkout(&mut self) -> bool {
        if !self.mounted || !self.overlay.is_cart_open() {
            return false;
        }
        let snapshot = self.cart.snapshot();
        if snapshot.is_empty() {
            return false;
        }
        debug!(
            lines = snapshot.items.len(),
            total = %snapshot.total,
            "Checkout requested"
        );
        if let Some(hook) = self.checkout_hook.as_mut() {
            hook(&snapshot);
        }
        self.handle(OverlayEvent::CloseViaExplicitAction);
        true
    }

    /// Advance presentation clocks by one frame.
    pub fn advance(&mut self, delta: Duration) {
        if !self.mounted || self.settings.options.reduced_motion {
            return;
        }
        match self.overlay {
            OverlayState::MenuOpen => {
                self.menu_elapsed = self.menu_elapsed.saturating_add(delta);
            }
            OverlayState::CartOpen => {
                for marquee in &mut self.marquees {
                    marquee.advance(delta);
                }
            }
            OverlayState::Closed => {}
        }
    }

    /// Visibility report from the host after layout.
    pub fn report_intersections(
        &mut self,
        now: Instant,
        entries: &[IntersectionEntry],
    ) -> Vec<AnchorId> {
        if !self.mounted {
            return Vec::new();
        }
        self.revealer.on_intersections(now, entries)
    }

    /// Fire due reveal timers.
    pub fn tick(&mut self, now: Instant) -> Vec<AnchorId> {
        if !self.mounted {
            return Vec::new();
        }
        self.revealer.tick(now)
    }

    /// Anchors the host should still report visibility for.
    pub fn observed_anchors(&self) -> impl Iterator<Item = AnchorId> + '_ {
        self.revealer.observed()
    }

    #[must_use]
    pub fn is_revealed(&self, anchor: AnchorId) -> bool {
        self.revealer.is_revealed(anchor)
    }

    #[must_use]
    pub fn pending_reveals(&self) -> usize {
        self.revealer.pending_timers()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.revealer.next_deadline()
    }

    #[must_use]
    pub fn settings(&self) -> &NavigationSettings {
        &self.settings
    }

    /// Push the scroll lock derived from the current overlay to the page.
    fn apply_side_effects(&self) {
        self.scroll_lock.set_locked(self.overlay.scroll_locked());
    }

    /// Release the page and every pending reveal. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.scroll_lock.set_locked(false);
        self.revealer.teardown();
        if self.mounted {
            self.mounted = false;
            self.overlay = OverlayState::Closed;
            debug!("Navigation torn down");
        }
    }

    #[must_use]
    pub fn view(&self) -> NavigationView<'_> {
        let cart_open = self.overlay.is_cart_open();
        // Badge and panel read the same snapshot.
        let cart = self.cart.snapshot();
        let header = HeaderView {
            links: &NAV_LINKS,
            links_visible: self.revealer.is_revealed(AnchorId::NavLinks),
            icons_visible: self.revealer.is_revealed(AnchorId::NavIcons),
            links_inverted: cart_open,
            icons_inverted: self.overlay.scroll_locked(),
            cart_icon: if cart_open {
                CartIcon::Close
            } else {
                CartIcon::Cart
            },
            cart_badge: !cart_open && !cart.is_empty(),
            menu_active: self.overlay.is_menu_open(),
        };

        let overlay = match self.overlay {
            OverlayState::Closed => OverlayView::Closed,
            OverlayState::CartOpen => {
                if cart.is_empty() {
                    OverlayView::EmptyCart(EmptyCartView {
                        heading: EMPTY_CART_HEADING,
                        button: EMPTY_CART_BUTTON,
                        marquees: &self.marquees,
                    })
                } else {
                    OverlayView::Cart(CartView {
                        cart,
                        checkout: CHECKOUT_BUTTON,
                    })
                }
            }
            OverlayState::MenuOpen => {
                let elapsed = if self.settings.options.reduced_motion {
                    Duration::MAX
                } else {
                    self.menu_elapsed
                };
                OverlayView::Menu(MenuView {
                    groups: &MENU_GROUPS,
                    labels: MENU_LINKS
                        .iter()
                        .map(|link| AnimatedLabel::new(*link, self.settings.glyph_step, elapsed))
                        .collect(),
                })
            }
        };

        NavigationView {
            header,
            overlay,
            scroll_locked: self.overlay.scroll_locked(),
        }
    }
}

impl Drop for NavigationController {
    fn drop(&mut self) {
        if self.mounted {
            self.teardown();
        }
    }
}

impl fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationController")
            .field("overlay", &self.overlay)
            .field("mounted", &self.mounted)
            .field("revealer", &self.revealer)
            .field("has_checkout_hook", &self.checkout_hook.is_some())
            .finish_non_exhaustive()
    }
}
