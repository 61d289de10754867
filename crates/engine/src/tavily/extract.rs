//! Helpers for turning raw search results into product fields.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use agentpay_core::Price;

static RETAILER_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*[-|:]\s*(Amazon\.com|Amazon|Best Buy|Walmart|Target|eBay|Newegg).*$")
        .expect("pattern must compile")
});
static TRAILING_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(.*?\)\s*$").expect("pattern must compile"));
static DOLLAR_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+,?\d*\.?\d{0,2})").expect("pattern must compile"));

/// Strip retailer suffixes ("... - Amazon.com") and a trailing
/// parenthetical from a result title.
pub(crate) fn clean_title(title: &str) -> String {
    let cleaned = RETAILER_SUFFIX.replace(title, "");
    let cleaned = TRAILING_PARENTHETICAL.replace(&cleaned, "");
    cleaned.trim().to_string()
}

/// The first dollar amount mentioned in the text, if any.
pub(crate) fn extract_price(text: &str) -> Option<Price> {
    let captures = DOLLAR_AMOUNT.captures(text)?;
    let digits = captures.get(1)?.as_str().replace(',', "");
    digits.parse::<Decimal>().ok().map(Price::usd)
}

/// Best-effort category bucket inferred from title and snippet keywords.
pub(crate) fn extract_category(title: &str, content: &str) -> String {
    let text = format!("{title} {content}").to_lowercase();

    let buckets: &[(&str, &[&str])] = &[
        ("Audio", &["headphone", "earbud", "speaker", "audio", "bluetooth"]),
        ("Electronics", &["laptop", "computer", "pc", "monitor", "keyboard", "mouse"]),
        ("Mobile", &["phone", "mobile", "tablet", "ipad"]),
        ("Clothing", &["shirt", "dress", "shoe", "clothing", "apparel", "jacket", "pants"]),
        ("Food & Grocery", &["food", "snack", "grocery", "organic"]),
        ("Home", &["home", "kitchen", "furniture", "decor", "blanket", "candle"]),
        ("Camera", &["camera", "photo", "lens"]),
        ("Toys & Games", &["game", "gaming", "console", "puzzle", "toy"]),
        ("Books", &["book", "reading"]),
        ("Beauty", &["beauty", "skincare", "makeup", "cosmetic"]),
    ];

    for (category, keywords) in buckets {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            return (*category).to_string();
        }
    }

    "General".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title_strips_retailer_suffix() {
        assert_eq!(
            clean_title("JBL Vibe Buds True Wireless Earbuds - Amazon.com"),
            "JBL Vibe Buds True Wireless Earbuds"
        );
        assert_eq!(
            clean_title("Sony WH-1000XM5 : Best Buy top pick"),
            "Sony WH-1000XM5"
        );
    }

    #[test]
    fn test_clean_title_strips_trailing_parenthetical() {
        assert_eq!(clean_title("Anker Soundcore 2 (Renewed)"), "Anker Soundcore 2");
    }

    #[test]
    fn test_clean_title_leaves_plain_titles_alone() {
        assert_eq!(clean_title("Fleece Throw Blanket"), "Fleece Throw Blanket");
    }

    #[test]
    fn test_extract_price_plain() {
        let price = extract_price("now only $29.99 with free shipping").expect("price");
        assert_eq!(price.display(), "$29.99");
    }

    #[test]
    fn test_extract_price_with_thousands_separator() {
        let price = extract_price("MSRP $1,299.00").expect("price");
        assert_eq!(price.display(), "$1299.00");
    }

    #[test]
    fn test_extract_price_none() {
        assert!(extract_price("no pricing information here").is_none());
    }

    #[test]
    fn test_extract_category_buckets() {
        assert_eq!(extract_category("JBL wireless earbuds", ""), "Audio");
        assert_eq!(extract_category("", "a 27-inch monitor stand"), "Electronics");
        assert_eq!(extract_category("Cotton crewneck shirt", ""), "Clothing");
        assert_eq!(extract_category("mystery gadget", "no keywords"), "General");
    }
}
