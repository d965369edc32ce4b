//! The storefront session: one cart, one navigation surface, one page.
//!
//! The catalog is a plain product list. It writes into
//! the [`CartStore`]; it never talks to the navigation controller.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::warn;

use vitrine_types::CartItem;

use crate::cart::CartStore;
use crate::config::{CatalogProduct, ConfigError, VitrineConfig};
use crate::navigation::{NavigationController, NavigationSettings};
use crate::viewport::SharedScrollLock;

pub struct Storefront {
    cart: CartStore,
    navigation: NavigationController,
    page: SharedScrollLock,
    catalog: Vec<CatalogProduct>,
    catalog_offset: usize,
    notice: Rc<RefCell<Option<String>>>,
    last_frame: Instant,
}

impl Storefront {
    pub fn new(config: Option<&VitrineConfig>) -> Result<Self, ConfigError> {
        let settings = VitrineConfig::navigation_settings(config)?;
        let catalog = VitrineConfig::catalog_products(config);
        Ok(Self::with_parts(catalog, settings, Instant::now()))
    }

    #[must_use]
    pub fn with_parts(
        catalog: Vec<CatalogProduct>,
        settings: NavigationSettings,
        now: Instant,
    ) -> Self {
        let cart = CartStore::new();
        let page = SharedScrollLock::new();
        let notice: Rc<RefCell<Option<String>>> = Rc::default();

        let mut navigation = NavigationController::mount(cart.clone(), page.clone(), settings);
        let sink = Rc::clone(&notice);
        navigation.set_checkout_hook(move |snapshot| {
            *sink.borrow_mut() = Some(format!(
                "Checkout: {} item(s), {}",
                snapshot.item_count(),
                snapshot.total
            ));
        });

        Self {
            cart,
            navigation,
            page,
            catalog,
            catalog_offset: 0,
            notice,
            last_frame: now,
        }
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    #[must_use]
    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut NavigationController {
        &mut self.navigation
    }

    #[must_use]
    pub fn catalog(&self) -> &[CatalogProduct] {
        &self.catalog
    }

    #[must_use]
    pub fn catalog_offset(&self) -> usize {
        self.catalog_offset
    }

    #[must_use]
    pub fn page_locked(&self) -> bool {
        self.page.is_locked()
    }

    #[must_use]
    pub fn notice(&self) -> Option<String> {
        self.notice.borrow().clone()
    }

    fn set_notice(&self, text: String) {
        *self.notice.borrow_mut() = Some(text);
    }

    /// Put one unit of the `index`-th catalog product in the cart.
    pub fn add_product(&mut self, index: usize) -> bool {
        let Some(product) = self.catalog.get(index) else {
            return false;
        };
        let added = CartItem::new(product.name.as_str(), product.price, 1)
            .and_then(|item| self.cart.add_item(item));
        match added {
            Ok(()) => {
                self.set_notice(format!("Added {}", product.name));
                true
            }
            Err(err) => {
                warn!("Could not add {}: {err}", product.name);
                self.set_notice(err.to_string());
                false
            }
        }
    }

    /// Take one unit off the most recently added line.
    pub fn remove_last_unit(&mut self) -> bool {
        let Some(last) = self.cart.items().pop() else {
            return false;
        };
        self.cart
            .set_quantity(last.name(), i64::from(last.quantity()) - 1);
        true
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Scroll the catalog list. Ignored while an overlay holds the scroll lock.
    pub fn scroll_catalog(&mut self, delta: isize) -> bool {
        if self.page.is_locked() {
            return false;
        }
        let max = self.catalog.len().saturating_sub(1);
        let next = self.catalog_offset.saturating_add_signed(delta).min(max);
        let moved = next != self.catalog_offset;
        self.catalog_offset = next;
        moved
    }

    pub fn frame_elapsed(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        elapsed
    }

    /// Advance animations to `now` and fire due reveal timers.
    pub fn tick(&mut self, now: Instant) {
        let elapsed = self.frame_elapsed(now);
        self.navigation.advance(elapsed);
        self.navigation.tick(now);
    }

    pub fn shutdown(&mut self) {
        self.navigation.teardown();
    }
}
