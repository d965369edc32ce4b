//! Cart line items.

use std::num::NonZeroU32;

use thiserror::Error;

use crate::{Money, NonEmptyString};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("cart item name must not be empty")]
    EmptyName,
    #[error("price of {name} must be greater than zero")]
    NonPositivePrice { name: String },
    #[error("quantity of {name} must be at least 1")]
    ZeroQuantity { name: String },
    #[error("quantity of {name} would exceed {max}")]
    QuantityOverflow { name: String, max: u32 },
}

/// One line in the cart. The name is the identity of the line.
///
/// Construction validates every field, so a `CartItem` always has a
/// non-empty name, a positive price and a quantity of at least one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    name: NonEmptyString,
    price: Money,
    quantity: NonZeroU32,
}

impl CartItem {
    pub fn new(name: impl Into<String>, price: Money, quantity: u32) -> Result<Self, CartError> {
        let name: String = name.into();
        let name = NonEmptyString::new(name.trim()).map_err(|_| CartError::EmptyName)?;
        if price.is_zero() {
            return Err(CartError::NonPositivePrice {
                name: name.into_inner(),
            });
        }
        let Some(quantity) = NonZeroU32::new(quantity) else {
            return Err(CartError::ZeroQuantity {
                name: name.into_inner(),
            });
        };
        Ok(Self {
            name,
            price,
            quantity,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub fn price(&self) -> Money {
        self.price
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// `price * quantity` for this line.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.price.times(self.quantity.get())
    }

    /// Whether this line is identified by `name`, ignoring surrounding whitespace.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.as_str() == name.trim()
    }

    /// Add `extra` units, keeping the existing price.
    pub fn merge_quantity(&mut self, extra: u32) -> Result<(), CartError> {
        let merged = self
            .quantity
            .checked_add(extra)
            .ok_or_else(|| CartError::QuantityOverflow {
                name: self.name.as_str().to_string(),
                max: u32::MAX,
            })?;
        self.quantity = merged;
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }
}

/// Items and total read together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    pub total: Money,
}

impl CartSnapshot {
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let total = items.iter().map(CartItem::subtotal).sum();
        Self { items, total }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }
}
