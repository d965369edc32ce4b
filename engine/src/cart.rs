//! Shared cart store.
//!
//! One [`CartStore`] is created per session and handed to every consumer
//! (catalog, navigation). Clones are handles to the same cart; a mutation
//! through any handle is visible to all of them immediately.

use std::num::NonZeroU32;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use vitrine_types::{CartError, CartItem, CartSnapshot, Money};

#[derive(Debug, Clone, Default)]
pub struct CartStore {
    items: Arc<RwLock<Vec<CartItem>>>,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Every mutation completes while holding the write lock, so a poisoned
    // lock still guards a consistent cart.
    fn read(&self) -> RwLockReadGuard<'_, Vec<CartItem>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<CartItem>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add `item`, merging into an existing line with the same name.
    ///
    /// A merge adds the incoming quantity and keeps the price already in the
    /// cart. On overflow the cart is left unchanged.
    pub fn add_item(&self, item: CartItem) -> Result<(), CartError> {
        let mut items = self.write();
        if let Some(existing) = items.iter_mut().find(|line| line.has_name(item.name())) {
            existing.merge_quantity(item.quantity())?;
            debug!(
                name = existing.name(),
                quantity = existing.quantity(),
                "Merged cart line"
            );
            return Ok(());
        }
        debug!(
            name = item.name(),
            quantity = item.quantity(),
            price = %item.price(),
            "Added cart line"
        );
        items.push(item);
        Ok(())
    }

    /// Remove the line named `name`. Unknown names are ignored.
    pub fn remove_item(&self, name: &str) {
        let mut items = self.write();
        let before = items.len();
        items.retain(|line| !line.has_name(name));
        if items.len() != before {
            debug!(name, "Removed cart line");
        }
    }

    /// Set the quantity of `name`. Zero or negative removes the line.
    pub fn set_quantity(&self, name: &str, quantity: i64) {
        let Some(quantity) = u32::try_from(quantity).ok().and_then(NonZeroU32::new) else {
            if quantity > 0 {
                // Larger than any representable quantity; clamp rather than drop.
                self.set_quantity(name, i64::from(u32::MAX));
            } else {
                self.remove_item(name);
            }
            return;
        };
        let mut items = self.write();
        if let Some(line) = items.iter_mut().find(|line| line.has_name(name)) {
            line.set_quantity(quantity);
            debug!(name, quantity = quantity.get(), "Updated cart quantity");
        }
    }

    pub fn clear(&self) {
        let mut items = self.write();
        if !items.is_empty() {
            debug!(lines = items.len(), "Cleared cart");
        }
        items.clear();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.read().clone()
    }

    /// `sum(price * quantity)` over the current lines.
    #[must_use]
    pub fn total(&self) -> Money {
        self.read().iter().map(CartItem::subtotal).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.read()
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Items and total taken under one lock.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from_items(self.read().clone())
    }

    /// Quantity of the line named `name`, if present.
    #[must_use]
    pub fn quantity_of(&self, name: &str) -> Option<u32> {
        self.read()
            .iter()
            .find(|line| line.has_name(name))
            .map(CartItem::quantity)
    }
}
