//! Products and cart items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price::Price;

/// Where a product came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductSource {
    /// A product from the built-in catalog.
    #[default]
    Catalog,
    /// A product synthesized from a web search result.
    Web,
}

/// A purchasable product.
///
/// Immutable once constructed. Web-resolved instances are freshly
/// synthesized per search and carry a `web-` prefixed identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Price; zero amount means unknown.
    pub price: Price,
    /// Emoji glyph used as the product icon.
    pub image: String,
    /// Category label (e.g., "Audio", "Clothing").
    pub category: String,
    /// Whether the product is in stock.
    pub in_stock: bool,
    /// Direct purchase URL, when resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Origin of this product.
    pub source: ProductSource,
}

/// A product plus a quantity in a cart.
///
/// A cart holds at most one `CartItem` per distinct product identifier;
/// adding an already-present product merges quantities instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product being purchased.
    pub product: Product,
    /// Positive quantity.
    pub quantity: u32,
}

impl CartItem {
    /// Create a cart item.
    #[must_use]
    pub const fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        Price::new(
            self.product.price.amount * Decimal::from(self.quantity),
            self.product.price.currency_code,
        )
    }
}
