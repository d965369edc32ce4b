//! Render-ready snapshots of the navigation surface.
//!
//! The controller builds these on every frame; the TUI only draws them.

use std::time::Duration;

use vitrine_types::ui::{GlyphDescriptor, MarqueeEffect, animate_with_step};
use vitrine_types::CartSnapshot;

/// A header or menu link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub text: &'static str,
    /// Drawn with a trailing up-right arrow.
    pub arrow: bool,
}

/// A titled column of static menu links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkGroup {
    pub title: &'static str,
    pub links: &'static [&'static str],
}

pub const NAV_LINKS: [NavLink; 3] = [
    NavLink {
        text: "SOBRE NÓS",
        arrow: false,
    },
    NavLink {
        text: "SHOP",
        arrow: true,
    },
    NavLink {
        text: "CONTATO",
        arrow: false,
    },
];

pub const MENU_LINKS: [NavLink; 3] = [
    NavLink {
        text: "SHOP",
        arrow: true,
    },
    NavLink {
        text: "CONTATO",
        arrow: false,
    },
    NavLink {
        text: "SOBRE NÓS",
        arrow: false,
    },
];

pub const MENU_GROUPS: [LinkGroup; 3] = [
    LinkGroup {
        title: "Connect With Us",
        links: &["Instagram", "Facebook", "Twitter", "Snapchat"],
    },
    LinkGroup {
        title: "FAQ",
        links: &["Saiba mais sobre", "Sobre isso", "E sobre isso"],
    },
    LinkGroup {
        title: "Get Started",
        links: &["Careers"],
    },
];

pub const EMPTY_CART_HEADING: &str = "Seu carrinho está vazio.";
pub const EMPTY_CART_BUTTON: &str = "Confira o que há de melhor.";
pub const CHECKOUT_BUTTON: &str = "Checkout";
pub const TOTAL_LABEL: &str = "Total:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartIcon {
    Cart,
    /// Shown in place of the cart while the cart panel is open.
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub links: &'static [NavLink],
    pub links_visible: bool,
    pub icons_visible: bool,
    /// Light-on-dark links; set while the cart panel covers the page.
    pub links_inverted: bool,
    /// Light-on-dark icons; set while any overlay is open.
    pub icons_inverted: bool,
    pub cart_icon: CartIcon,
    pub cart_badge: bool,
    pub menu_active: bool,
}

/// A menu label whose glyphs rise one after another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimatedLabel {
    pub link: NavLink,
    pub glyphs: Vec<GlyphDescriptor>,
    /// Time since the menu opened.
    pub elapsed: Duration,
}

impl AnimatedLabel {
    #[must_use]
    pub fn new(link: NavLink, step: Duration, elapsed: Duration) -> Self {
        Self {
            link,
            glyphs: animate_with_step(link.text, step),
            elapsed,
        }
    }

    /// All glyphs have finished rising.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.glyphs
            .iter()
            .all(|glyph| glyph.progress(self.elapsed) >= 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub groups: &'static [LinkGroup],
    pub labels: Vec<AnimatedLabel>,
}

#[derive(Debug, Clone)]
pub struct EmptyCartView<'a> {
    pub heading: &'static str,
    pub button: &'static str,
    pub marquees: &'a [MarqueeEffect],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub cart: CartSnapshot,
    pub checkout: &'static str,
}

/// What occupies the overlay layer this frame. At most one panel.
#[derive(Debug, Clone)]
pub enum OverlayView<'a> {
    Closed,
    EmptyCart(EmptyCartView<'a>),
    Cart(CartView),
    Menu(MenuView),
}

impl OverlayView<'_> {
    #[must_use]
    pub fn is_cart(&self) -> bool {
        matches!(self, Self::EmptyCart(_) | Self::Cart(_))
    }

    #[must_use]
    pub fn is_menu(&self) -> bool {
        matches!(self, Self::Menu(_))
    }
}

#[derive(Debug, Clone)]
pub struct NavigationView<'a> {
    pub header: HeaderView,
    pub overlay: OverlayView<'a>,
    pub scroll_locked: bool,
}
