//! The in-memory order history store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use uuid::Uuid;

use agentpay_core::{CartItem, Order, OrderStatus, Price};

/// Order history, newest first.
///
/// Orders are created only by checkout and never mutated afterwards.
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: Mutex<Vec<Order>>,
}

impl OrderStore {
    /// Create an empty order history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Order>> {
        self.orders.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Place an order from a snapshot of cart items.
    ///
    /// The item list is stored as given - callers pass an owned snapshot,
    /// so later cart mutation cannot affect the placed order. The new order
    /// is prepended to the history.
    pub fn place_order(&self, items: Vec<CartItem>, total: Price) -> Order {
        let order = Order {
            id: short_order_code(),
            items,
            total,
            status: OrderStatus::Confirmed,
            created_at: Utc::now(),
        };
        self.lock().insert(0, order.clone());
        order
    }

    /// Look up an order by its code.
    #[must_use]
    pub fn get_order(&self, id: &str) -> Option<Order> {
        self.lock().iter().find(|order| order.id == id).cloned()
    }

    /// The most recently placed order.
    #[must_use]
    pub fn latest(&self) -> Option<Order> {
        self.lock().first().cloned()
    }

    /// Snapshot of all orders, newest first.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.lock().clone()
    }

    /// Number of placed orders.
    #[must_use]
    pub fn count(&self) -> usize {
        self.lock().len()
    }
}

/// Short opaque order code: the first 8 hex digits of a v4 UUID,
/// uppercased.
fn short_order_code() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(8)
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentpay_core::{Product, ProductSource};
    use rust_decimal::Decimal;

    fn item(id: &str, price_cents: i64, quantity: u32) -> CartItem {
        CartItem::new(
            Product {
                id: id.to_string(),
                name: format!("Product {id}"),
                description: String::new(),
                price: Price::usd(Decimal::new(price_cents, 2)),
                image: String::new(),
                category: "Test".to_string(),
                in_stock: true,
                url: None,
                source: ProductSource::Catalog,
            },
            quantity,
        )
    }

    #[test]
    fn test_place_order_snapshot_is_isolated() {
        let store = OrderStore::new();
        let items = vec![item("a", 1000, 2)];
        let total = Price::usd(Decimal::new(2000, 2));

        let placed = store.place_order(items.clone(), total);

        // Mutating the caller's list must not touch the placed order.
        let mut caller_items = items;
        caller_items.clear();

        let fetched = store.get_order(&placed.id).expect("order exists");
        assert_eq!(fetched.items.len(), 1);
        assert_eq!(fetched.total, total);
        assert_eq!(fetched.status, OrderStatus::Confirmed);
    }

    #[test]
    fn test_orders_are_newest_first() {
        let store = OrderStore::new();
        let first = store.place_order(vec![item("a", 100, 1)], Price::usd(Decimal::ONE));
        let second = store.place_order(vec![item("b", 200, 1)], Price::usd(Decimal::TWO));

        let orders = store.orders();
        assert_eq!(orders.first().map(|o| o.id.clone()), Some(second.id));
        assert_eq!(orders.last().map(|o| o.id.clone()), Some(first.id));
        assert_eq!(store.latest().map(|o| o.id), store.orders().first().map(|o| o.id.clone()));
    }

    #[test]
    fn test_order_code_shape() {
        let store = OrderStore::new();
        let order = store.place_order(vec![], Price::zero());
        assert_eq!(order.id.len(), 8);
        assert!(order.id.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_get_order_miss() {
        let store = OrderStore::new();
        assert!(store.get_order("NOPE1234").is_none());
    }
}
