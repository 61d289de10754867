//! Tool execution against the session stores.

use chrono::Utc;
use futures::future;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use agentpay_core::{Price, Product, ProductSource, RichContent};

use crate::agent::ProductResolver;
use crate::session::Session;
use crate::tavily::{SearchHit, clean_title, extract_category, extract_price};

/// Result of executing one tool: a machine-readable result string for the
/// model, plus optional structured content for the eventual reply.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    /// Result text fed back to the model.
    pub result: String,
    /// Structured content to attach to the final reply, if any.
    pub rich_content: Option<RichContent>,
}

impl ToolOutcome {
    fn text(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            rich_content: None,
        }
    }
}

/// A candidate product supplied by the model for `search_products`.
#[derive(Debug, Deserialize)]
struct RawProduct {
    name: String,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// Executor for the shopping tools.
///
/// Invoked only by the AI orchestrator; resolution failures and unknown
/// tools produce explanatory result text rather than errors, so the model
/// can recover on the next round-trip.
pub struct ToolExecutor<'a> {
    session: &'a Session,
    resolver: &'a dyn ProductResolver,
}

impl<'a> ToolExecutor<'a> {
    /// Create a new tool executor.
    #[must_use]
    pub const fn new(session: &'a Session, resolver: &'a dyn ProductResolver) -> Self {
        Self { session, resolver }
    }

    /// Execute a tool by name.
    ///
    /// `last_search` is the orchestrator's most recent search result set;
    /// `search_products` replaces it and `add_to_cart` resolves indices and
    /// names against it.
    #[instrument(skip(self, args, last_search), fields(tool_name = %name))]
    pub async fn execute(
        &self,
        name: &str,
        args: &Map<String, Value>,
        last_search: &mut Vec<Product>,
    ) -> ToolOutcome {
        match name {
            "search_products" => self.search_products(args, last_search).await,
            "add_to_cart" => self.add_to_cart(args, last_search),
            "view_cart" => self.view_cart(),
            "checkout" => self.checkout(),
            _ => ToolOutcome::text(format!("Unknown tool: {name}")),
        }
    }

    /// Resolve model-recommended products to real purchase pages and make
    /// them the current search result set.
    async fn search_products(
        &self,
        args: &Map<String, Value>,
        last_search: &mut Vec<Product>,
    ) -> ToolOutcome {
        let raw: Vec<RawProduct> = args
            .get("products")
            .map(|value| serde_json::from_value(value.clone()).unwrap_or_default())
            .unwrap_or_default();

        if raw.is_empty() {
            return ToolOutcome::text(
                "No product recommendations provided. Please suggest specific products.",
            );
        }

        let products = resolve_candidates(self.resolver, raw).await;

        let summary = products
            .iter()
            .enumerate()
            .map(|(index, product)| {
                let url = product
                    .url
                    .as_ref()
                    .map(|u| format!(" ({u})"))
                    .unwrap_or_default();
                format!(
                    "{index}: {} - {}{url}",
                    product.name,
                    product.price.display_or_na()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        // Replace, not merge: index references always mean the latest search.
        *last_search = products.clone();

        ToolOutcome {
            result: format!(
                "Found {} products with direct purchase links:\n{summary}",
                products.len()
            ),
            rich_content: Some(RichContent::Products { products }),
        }
    }

    /// Add a product to the cart, resolving by search index, then search
    /// result name, then cart item name.
    fn add_to_cart(&self, args: &Map<String, Value>, last_search: &[Product]) -> ToolOutcome {
        let index = args
            .get("product_index")
            .and_then(Value::as_u64)
            .and_then(|i| usize::try_from(i).ok());
        let name = args.get("product_name").and_then(Value::as_str);

        let product = match index {
            Some(i) if i < last_search.len() => last_search.get(i).cloned(),
            _ => name.and_then(|n| {
                let lower = n.to_lowercase();
                last_search
                    .iter()
                    .find(|p| p.name.to_lowercase().contains(&lower))
                    .cloned()
                    .or_else(|| {
                        self.session
                            .cart
                            .items()
                            .into_iter()
                            .find(|item| item.product.name.to_lowercase().contains(&lower))
                            .map(|item| item.product)
                    })
            }),
        };

        let Some(product) = product else {
            let available = if last_search.is_empty() {
                "none (try searching first)".to_string()
            } else {
                last_search
                    .iter()
                    .enumerate()
                    .map(|(i, p)| format!("{i}: {}", p.name))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            return ToolOutcome::text(format!(
                "Could not find the product to add. Available products from last search: {available}"
            ));
        };

        self.session.cart.add_item(product.clone(), 1);

        ToolOutcome::text(format!(
            "Added \"{}\" ({}) to cart. Cart now has {} item(s).",
            product.name,
            product.price.display_or_na(),
            self.session.cart.item_count()
        ))
    }

    fn view_cart(&self) -> ToolOutcome {
        let items = self.session.cart.items();
        if items.is_empty() {
            return ToolOutcome::text("The cart is empty.");
        }

        let summary = items
            .iter()
            .map(|item| {
                format!(
                    "- {} x{} = {}",
                    item.product.name,
                    item.quantity,
                    item.line_total().display()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        let total = self.session.cart.total();

        ToolOutcome {
            result: format!("Cart contents:\n{summary}\nTotal: {}", total.display()),
            rich_content: Some(RichContent::Cart { items, total }),
        }
    }

    fn checkout(&self) -> ToolOutcome {
        let items = self.session.cart.items();
        if items.is_empty() {
            return ToolOutcome::text("Cannot checkout \u{2014} the cart is empty.");
        }

        let total = self.session.cart.total();
        let order = self.session.orders.place_order(items, total);
        self.session.cart.clear();

        info!(order_id = %order.id, total = %total.display(), "order placed via tool call");

        ToolOutcome {
            result: format!(
                "Order placed successfully! Order ID: {}, Total: {}",
                order.id,
                total.display()
            ),
            rich_content: Some(RichContent::Order { order }),
        }
    }
}

/// Resolve each candidate to a purchase page, in parallel with order
/// preserved. A failed lookup degrades that candidate only: it keeps the
/// model-supplied fields and simply lacks a URL.
async fn resolve_candidates(resolver: &dyn ProductResolver, raw: Vec<RawProduct>) -> Vec<Product> {
    let lookups = raw.iter().map(|candidate| resolver.lookup(&candidate.name));
    let hits = future::join_all(lookups).await;
    let stamp = Utc::now().timestamp_millis();

    raw.into_iter()
        .zip(hits)
        .enumerate()
        .map(|(index, (candidate, hit))| {
            let hit = match hit {
                Ok(hit) => hit,
                Err(error) => {
                    warn!(product = %candidate.name, %error, "product URL resolution failed");
                    None
                }
            };
            synthesize_product(index, stamp, candidate, hit)
        })
        .collect()
}

/// Build a web-sourced product from a model candidate and an optional
/// resolved page. Model-supplied fields win; resolved data fills the gaps.
fn synthesize_product(
    index: usize,
    stamp: i64,
    candidate: RawProduct,
    hit: Option<SearchHit>,
) -> Product {
    let supplied_price = candidate
        .price
        .and_then(|p| Decimal::try_from(p).ok())
        .filter(|d| d.is_sign_positive() && !d.is_zero())
        .map(Price::usd);

    let price = supplied_price
        .or_else(|| {
            hit.as_ref()
                .and_then(|h| extract_price(&h.content).or_else(|| extract_price(&h.title)))
        })
        .unwrap_or_else(Price::zero);

    let name = hit
        .as_ref()
        .map_or_else(|| candidate.name.clone(), |h| clean_title(&h.title));

    let description = candidate
        .description
        .filter(|d| !d.is_empty())
        .or_else(|| {
            hit.as_ref()
                .map(|h| h.content.chars().take(150).collect::<String>())
        })
        .unwrap_or_default();

    let category = candidate
        .category
        .filter(|c| !c.is_empty())
        .or_else(|| {
            hit.as_ref()
                .map(|h| extract_category(&h.title, &h.content))
        })
        .unwrap_or_else(|| "General".to_string());

    Product {
        id: format!("web-{stamp}-{index}"),
        name,
        description,
        price,
        image: "\u{1f50d}".to_string(),
        category,
        in_stock: true,
        url: hit.map(|h| h.url),
        source: ProductSource::Web,
    }
}
