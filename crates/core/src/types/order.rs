//! Orders placed at checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::price::Price;
use super::product::CartItem;

/// Order lifecycle status.
///
/// Moves forward only: processing, confirmed, delivered. Checkout produces
/// orders directly in the confirmed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Processing,
    #[default]
    Confirmed,
    Delivered,
}

/// A placed order.
///
/// The item list is a snapshot taken at checkout time - it does not alias
/// the live cart, so later cart mutation never affects a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Short opaque order code, unique within the order collection.
    pub id: String,
    /// Snapshot of the cart items at checkout.
    pub items: Vec<CartItem>,
    /// Total at snapshot time (sum of line totals).
    pub total: Price,
    /// Current status.
    pub status: OrderStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_serialization() {
        let json = serde_json::to_string(&OrderStatus::Confirmed).expect("serialize");
        assert_eq!(json, "\"confirmed\"");

        let status: OrderStatus = serde_json::from_str("\"delivered\"").expect("deserialize");
        assert_eq!(status, OrderStatus::Delivered);
    }
}
