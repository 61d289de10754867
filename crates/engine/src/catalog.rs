//! The built-in demo product catalog.

use agentpay_core::{Price, Product, ProductSource};
use rust_decimal::Decimal;

fn catalog_product(
    id: &str,
    name: &str,
    description: &str,
    price_cents: i64,
    image: &str,
    category: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: Price::usd(Decimal::new(price_cents, 2)),
        image: image.to_string(),
        category: category.to_string(),
        in_stock: true,
        url: None,
        source: ProductSource::Catalog,
    }
}

/// The built-in catalog used when no custom catalog is injected.
#[must_use]
pub fn builtin_catalog() -> Vec<Product> {
    vec![
        catalog_product(
            "wireless-mouse",
            "Wireless Mouse",
            "Ergonomic 2.4GHz wireless mouse with silent clicks",
            2499,
            "\u{1f5b1}\u{fe0f}",
            "Electronics",
        ),
        catalog_product(
            "mechanical-keyboard",
            "Mechanical Keyboard",
            "Hot-swappable mechanical keyboard with RGB backlight",
            8999,
            "\u{2328}\u{fe0f}",
            "Electronics",
        ),
        catalog_product(
            "noise-cancelling-headphones",
            "Noise-Cancelling Headphones",
            "Over-ear wireless headphones with active noise cancellation",
            19999,
            "\u{1f3a7}",
            "Audio",
        ),
        catalog_product(
            "bluetooth-speaker",
            "Bluetooth Speaker",
            "Portable waterproof speaker with 12-hour battery life",
            4999,
            "\u{1f50a}",
            "Audio",
        ),
        catalog_product(
            "cotton-tshirt",
            "Cotton T-Shirt",
            "Soft organic cotton tee in classic fit",
            1999,
            "\u{1f455}",
            "Clothing",
        ),
        catalog_product(
            "denim-jacket",
            "Denim Jacket",
            "Medium-wash denim jacket with button front",
            7999,
            "\u{1f9e5}",
            "Clothing",
        ),
        catalog_product(
            "organic-trail-mix",
            "Organic Trail Mix",
            "Nuts, seeds, and dried fruit with no added sugar",
            1299,
            "\u{1f95c}",
            "Food & Grocery",
        ),
        catalog_product(
            "cold-brew-coffee",
            "Cold Brew Coffee Concentrate",
            "Smooth small-batch cold brew, makes 8 servings",
            1599,
            "\u{2615}",
            "Food & Grocery",
        ),
        catalog_product(
            "scented-candle",
            "Scented Candle",
            "Hand-poured soy candle with cedar and vanilla notes",
            1899,
            "\u{1f56f}\u{fe0f}",
            "Home",
        ),
        catalog_product(
            "throw-blanket",
            "Fleece Throw Blanket",
            "Oversized plush fleece blanket for the couch",
            3499,
            "\u{1f6cb}\u{fe0f}",
            "Home",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let catalog = builtin_catalog();
        let mut ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len(), "duplicate product ids in catalog");
    }

    #[test]
    fn test_catalog_has_priced_in_stock_products() {
        for product in builtin_catalog() {
            assert!(!product.price.is_unknown(), "{} has no price", product.name);
            assert!(product.in_stock, "{} is out of stock", product.name);
            assert_eq!(product.source, ProductSource::Catalog);
        }
    }
}
