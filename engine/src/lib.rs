//! Core engine for Vitrine - cart store and navigation state machine.
//!
//! This crate owns all storefront state without TUI dependencies. The host
//! loop drives it with user events, frame deltas, clock ticks and viewport
//! reports, then draws the [`NavigationView`] it hands back.

mod cart;
mod config;
mod navigation;
mod reveal;
mod storefront;
mod timers;
mod viewport;

pub use cart::CartStore;
pub use config::{
    CatalogConfig, CatalogProduct, ConfigError, ProductConfig, UiConfig, VitrineConfig,
    config_path,
};
pub use navigation::{
    AnimatedLabel, CHECKOUT_BUTTON, CartIcon, CartView, EMPTY_CART_BUTTON, EMPTY_CART_HEADING,
    EmptyCartView, HeaderView, LinkGroup, MENU_GROUPS, MENU_LINKS, MenuView, NAV_LINKS, NavLink,
    NavigationController, NavigationSettings, NavigationView, OverlayView, PanelAction,
    TOTAL_LABEL,
};
pub use reveal::{DEFAULT_REVEAL_DELAY, DEFAULT_REVEAL_THRESHOLD, RevealSettings, VisibilityRevealer};
pub use storefront::Storefront;
pub use timers::{TimerId, TimerQueue};
pub use viewport::{IntersectionEntry, ScrollLock, SharedScrollLock};

pub use vitrine_types::ui::{AnchorId, OverlayEvent, OverlayState, UiOptions};
pub use vitrine_types::{CartError, CartItem, CartSnapshot, Money, MoneyParseError, NonEmptyString};
