//! The in-memory cart store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;

use agentpay_core::{CartItem, Price, Product};

/// The live shopping cart.
///
/// Invariant: at most one [`CartItem`] per distinct product identifier.
/// Adding a product that is already present merges quantities.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Mutex<Vec<CartItem>>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CartItem>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add `quantity` units of a product, merging with an existing entry
    /// for the same product identifier.
    pub fn add_item(&self, product: Product, quantity: u32) {
        let mut items = self.lock();
        if let Some(existing) = items.iter_mut().find(|item| item.product.id == product.id) {
            existing.quantity += quantity;
        } else {
            items.push(CartItem::new(product, quantity));
        }
    }

    /// Remove a product from the cart. Removing an absent product is a
    /// no-op.
    pub fn remove_item(&self, product_id: &str) {
        self.lock().retain(|item| item.product.id != product_id);
    }

    /// Set the quantity for a product. A quantity of zero removes the
    /// entry; updating an absent product is a no-op.
    pub fn update_quantity(&self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }
        let mut items = self.lock();
        if let Some(item) = items.iter_mut().find(|item| item.product.id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Empty the cart.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Snapshot of the current items.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.lock().clone()
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Cart total: sum of price times quantity over all entries.
    #[must_use]
    pub fn total(&self) -> Price {
        let amount = self
            .lock()
            .iter()
            .map(|item| item.product.price.amount * Decimal::from(item.quantity))
            .sum();
        Price::usd(amount)
    }

    /// Total number of units in the cart (sum of quantities).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lock().iter().map(|item| item.quantity).sum()
    }
}
