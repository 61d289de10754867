//! The deterministic rule-based dispatcher.
//!
//! Consumes a classified intent and executes the corresponding commerce
//! action against the session stores. Every outcome - including every
//! no-match condition - is a user-visible reply; nothing here can fail.

use tokio::time::sleep;
use tracing::{info, instrument};

use agentpay_core::{Product, RichContent};

use crate::intent::Intent;
use crate::session::Session;

use super::Pacing;

/// Rule-based handler for one classified turn.
pub struct RuleDispatcher<'a> {
    session: &'a Session,
    pacing: &'a Pacing,
}

impl<'a> RuleDispatcher<'a> {
    /// Create a dispatcher over a session.
    #[must_use]
    pub const fn new(session: &'a Session, pacing: &'a Pacing) -> Self {
        Self { session, pacing }
    }

    /// Execute the action for an intent. All effects land in the session's
    /// chat, cart, and order stores.
    #[instrument(skip(self, query), fields(intent = ?intent))]
    pub async fn dispatch(&self, intent: Intent, query: &str) {
        match intent {
            Intent::Greeting => self.greeting(),
            Intent::Help => self.help(),
            Intent::Browse => self.browse(query),
            Intent::Search => self.search(query),
            Intent::AddToCart => self.add_to_cart(query),
            Intent::ViewCart => self.view_cart(),
            Intent::Checkout => self.checkout().await,
            Intent::OrderStatus => self.order_status(),
            Intent::Unknown => self.unknown(),
        }
    }

    fn greeting(&self) {
        self.session.chat.add_agent_message(
            "Welcome to AgentPay! \u{1f44b} I'm your AI shopping assistant. I can help you \
             browse products, add items to your cart, and checkout. Try saying **\"show me \
             products\"** or **\"help\"** to see what I can do!",
            None,
        );
    }

    fn help(&self) {
        self.session.chat.add_agent_message(
            "Here's what I can help you with:\n\n\
             \u{2022} **\"show products\"** \u{2014} Browse our full catalog\n\
             \u{2022} **\"find [item]\"** \u{2014} Search for specific products\n\
             \u{2022} **\"add [product name]\"** \u{2014} Add an item to your cart\n\
             \u{2022} **\"my cart\"** \u{2014} View your cart\n\
             \u{2022} **\"checkout\"** \u{2014} Complete your purchase\n\
             \u{2022} **\"order status\"** \u{2014} Check your orders\n\n\
             Just type naturally \u{2014} I'll understand!",
            None,
        );
    }

    fn browse(&self, query: &str) {
        let results = find_products(&self.session.catalog, query);
        if results.is_empty() {
            self.session.chat.add_agent_message(
                format!(
                    "I couldn't find any products matching \"{query}\". Try **\"show \
                     products\"** to see our full catalog."
                ),
                None,
            );
        } else {
            let label = if query.is_empty() {
                "Here's our product catalog".to_string()
            } else {
                format!("Here's what I found for \"{query}\"")
            };
            let count = results.len();
            self.session.chat.add_agent_message(
                format!(
                    "{label} \u{2014} **{count} items** available. Click the + button to add \
                     any item to your cart!"
                ),
                Some(RichContent::Products { products: results }),
            );
        }
    }

    fn search(&self, query: &str) {
        let results = find_products(&self.session.catalog, query);
        if results.is_empty() {
            self.session.chat.add_agent_message(
                format!(
                    "I couldn't find anything matching \"{query}\". Try browsing our full \
                     catalog with **\"show products\"**."
                ),
                None,
            );
        } else {
            let count = results.len();
            let plural = if count > 1 { "s" } else { "" };
            self.session.chat.add_agent_message(
                format!("I found **{count} item{plural}** matching \"{query}\":"),
                Some(RichContent::Products { products: results }),
            );
        }
    }

    fn add_to_cart(&self, query: &str) {
        let Some(product) = find_best_match(&self.session.catalog, query) else {
            self.session.chat.add_agent_message(
                format!(
                    "I couldn't find a product matching \"{query}\". Try **\"show \
                     products\"** to see what's available."
                ),
                None,
            );
            return;
        };

        let product = product.clone();
        self.session.cart.add_item(product.clone(), 1);
        self.session.chat.add_agent_message(
            format!(
                "Added **{}** ({}) to your cart! {}\n\nYour cart now has **{} item(s)**. Say \
                 **\"my cart\"** to review or **\"checkout\"** when ready.",
                product.name,
                product.price.display(),
                product.image,
                self.session.cart.item_count()
            ),
            None,
        );
    }

    fn view_cart(&self) {
        let items = self.session.cart.items();
        if items.is_empty() {
            self.session.chat.add_agent_message(
                "Your cart is empty! Try **\"show products\"** to browse our catalog and find \
                 something you like.",
                None,
            );
        } else {
            let total = self.session.cart.total();
            self.session.chat.add_agent_message(
                "Here's what's in your cart:",
                Some(RichContent::Cart { items, total }),
            );
        }
    }

    /// Two distinct replies: an interim processing message, then - after
    /// the simulated payment latency - the order confirmation.
    async fn checkout(&self) {
        let items = self.session.cart.items();
        if items.is_empty() {
            self.session.chat.add_agent_message(
                "Your cart is empty \u{2014} nothing to checkout! Try **\"show products\"** \
                 to add some items first.",
                None,
            );
            return;
        }

        let total = self.session.cart.total();

        self.session
            .chat
            .add_agent_message("Processing your payment...", Some(RichContent::Processing));

        if !self.pacing.checkout.is_zero() {
            sleep(self.pacing.checkout).await;
        }

        let order = self.session.orders.place_order(items, total);
        self.session.cart.clear();
        info!(order_id = %order.id, total = %total.display(), "checkout complete");

        self.session.chat.add_agent_message(
            "Payment successful! Your order has been confirmed. \u{1f389}",
            Some(RichContent::Order { order }),
        );
    }

    fn order_status(&self) {
        let Some(latest) = self.session.orders.latest() else {
            self.session.chat.add_agent_message(
                "You don't have any orders yet. Start shopping by saying **\"show \
                 products\"**!",
                None,
            );
            return;
        };

        let count = self.session.orders.count();
        self.session.chat.add_agent_message(
            format!("You have **{count} order(s)**. Here's your most recent:"),
            Some(RichContent::Order { order: latest }),
        );
    }

    fn unknown(&self) {
        self.session.chat.add_agent_message(
            "I'm not sure I understood that. Here are some things you can try:\n\n\
             \u{2022} **\"show products\"** \u{2014} Browse our catalog\n\
             \u{2022} **\"find headphones\"** \u{2014} Search for items\n\
             \u{2022} **\"add [product]\"** \u{2014} Add to cart\n\
             \u{2022} **\"checkout\"** \u{2014} Complete purchase\n\
             \u{2022} **\"help\"** \u{2014} See all commands",
            None,
        );
    }
}

/// Catalog items whose name, category, or description contains the query
/// (case-insensitive). An empty query matches the whole catalog.
pub(crate) fn find_products(catalog: &[Product], query: &str) -> Vec<Product> {
    if query.is_empty() {
        return catalog.to_vec();
    }

    let lower = query.to_lowercase();
    catalog
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&lower)
                || p.category.to_lowercase().contains(&lower)
                || p.description.to_lowercase().contains(&lower)
        })
        .cloned()
        .collect()
}

/// Best product match for an add-to-cart query: exact name, then name
/// substring, then any query token longer than two characters contained in
/// the name. Catalog order breaks ties at every tier.
pub(crate) fn find_best_match<'a>(catalog: &'a [Product], query: &str) -> Option<&'a Product> {
    if query.is_empty() {
        return None;
    }

    let lower = query.to_lowercase();

    if let Some(exact) = catalog.iter().find(|p| p.name.to_lowercase() == lower) {
        return Some(exact);
    }

    if let Some(partial) = catalog.iter().find(|p| p.name.to_lowercase().contains(&lower)) {
        return Some(partial);
    }

    let words: Vec<&str> = lower.split_whitespace().filter(|w| w.len() > 2).collect();
    catalog.iter().find(|p| {
        let name = p.name.to_lowercase();
        words.iter().any(|w| name.contains(w))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use agentpay_core::MessageRole;

    fn dispatch_sync(session: &Session, intent: Intent, query: &str) {
        let pacing = Pacing::instant();
        let dispatcher = RuleDispatcher::new(session, &pacing);
        futures::executor::block_on(dispatcher.dispatch(intent, query));
    }

    #[test]
    fn test_find_best_match_prefers_exact_name() {
        let catalog = builtin_catalog();
        let matched = find_best_match(&catalog, "wireless mouse").expect("match");
        assert_eq!(matched.name, "Wireless Mouse");
    }

    #[test]
    fn test_find_best_match_substring_tier() {
        let catalog = builtin_catalog();
        let matched = find_best_match(&catalog, "mouse").expect("match");
        assert_eq!(matched.name, "Wireless Mouse");
    }

    #[test]
    fn test_find_best_match_token_tier() {
        let catalog = builtin_catalog();
        // No product name contains the whole phrase; "blanket" is a token hit.
        let matched = find_best_match(&catalog, "cozy blanket please").expect("match");
        assert_eq!(matched.name, "Fleece Throw Blanket");
    }

    #[test]
    fn test_find_best_match_ignores_short_tokens() {
        let catalog = builtin_catalog();
        assert!(find_best_match(&catalog, "an is to").is_none());
        assert!(find_best_match(&catalog, "").is_none());
    }

    #[test]
    fn test_find_products_matches_category_and_description() {
        let catalog = builtin_catalog();
        let by_category = find_products(&catalog, "audio");
        assert!(by_category.iter().all(|p| p.category == "Audio"));
        assert!(!by_category.is_empty());

        let by_description = find_products(&catalog, "noise cancellation");
        assert_eq!(by_description.len(), 1);
    }

    #[test]
    fn test_find_products_empty_query_returns_catalog() {
        let catalog = builtin_catalog();
        assert_eq!(find_products(&catalog, "").len(), catalog.len());
    }

    #[test]
    fn test_browse_attaches_full_catalog() {
        let session = Session::new();
        let catalog_size = session.catalog.len();
        dispatch_sync(&session, Intent::Browse, "");

        let last = session.chat.last().expect("reply");
        assert_eq!(last.role, MessageRole::Agent);
        assert!(matches!(
            last.rich_content,
            Some(RichContent::Products { ref products }) if products.len() == catalog_size
        ));
    }

    #[test]
    fn test_add_to_cart_exact_product() {
        let session = Session::new();
        dispatch_sync(&session, Intent::AddToCart, "wireless mouse");

        assert_eq!(session.cart.item_count(), 1);
        let last = session.chat.last().expect("reply");
        assert!(last.content.contains("Wireless Mouse"));
    }

    #[test]
    fn test_add_to_cart_no_match_mutates_nothing() {
        let session = Session::new();
        dispatch_sync(&session, Intent::AddToCart, "zeppelin");

        assert!(session.cart.is_empty());
        let last = session.chat.last().expect("reply");
        assert!(last.content.contains("couldn't find a product"));
    }

    #[test]
    fn test_view_cart_empty_prompts_browse() {
        let session = Session::new();
        dispatch_sync(&session, Intent::ViewCart, "");
        let last = session.chat.last().expect("reply");
        assert!(last.content.contains("cart is empty"));
        assert!(last.rich_content.is_none());
    }

    #[test]
    fn test_checkout_empty_cart_refuses() {
        let session = Session::new();
        dispatch_sync(&session, Intent::Checkout, "");

        assert_eq!(session.orders.count(), 0);
        let last = session.chat.last().expect("reply");
        assert!(last.content.contains("nothing to checkout"));
    }

    #[tokio::test]
    async fn test_checkout_emits_processing_then_order() {
        let session = Session::new();
        let product = session.catalog.first().expect("product").clone();
        session.cart.add_item(product, 2);
        let expected_total = session.cart.total();

        let pacing = Pacing::instant();
        RuleDispatcher::new(&session, &pacing)
            .dispatch(Intent::Checkout, "")
            .await;

        let messages = session.chat.messages();
        assert_eq!(messages.len(), 2, "processing reply then order reply");
        assert_eq!(
            messages.first().and_then(|m| m.rich_content.clone()),
            Some(RichContent::Processing)
        );
        match messages.last().and_then(|m| m.rich_content.clone()) {
            Some(RichContent::Order { order }) => {
                assert_eq!(order.total, expected_total);
                assert_eq!(order.items.len(), 1);
            }
            other => panic!("expected order content, got {other:?}"),
        }
        assert!(session.cart.is_empty(), "cart cleared after checkout");
    }

    #[tokio::test]
    async fn test_order_mutation_isolated_from_cart() {
        let session = Session::new();
        let product = session.catalog.first().expect("product").clone();
        session.cart.add_item(product.clone(), 1);

        let pacing = Pacing::instant();
        RuleDispatcher::new(&session, &pacing)
            .dispatch(Intent::Checkout, "")
            .await;

        let placed = session.orders.latest().expect("order placed");
        let placed_total = placed.total;

        // Mutate the live cart after checkout; the placed order must not move.
        session.cart.add_item(product, 5);
        let again = session.orders.latest().expect("order still there");
        assert_eq!(again.items.len(), 1);
        assert_eq!(again.total, placed_total);
    }

    #[test]
    fn test_order_status_references_most_recent() {
        let session = Session::new();
        dispatch_sync(&session, Intent::OrderStatus, "");
        let last = session.chat.last().expect("reply");
        assert!(last.content.contains("don't have any orders"));

        let product = session.catalog.first().expect("product").clone();
        session.cart.add_item(product, 1);
        dispatch_sync(&session, Intent::Checkout, "");
        dispatch_sync(&session, Intent::OrderStatus, "");

        let last = session.chat.last().expect("reply");
        assert!(last.content.contains("1 order(s)"));
        assert!(matches!(last.rich_content, Some(RichContent::Order { .. })));
    }

    #[test]
    fn test_greeting_and_help_do_not_mutate() {
        let session = Session::new();
        dispatch_sync(&session, Intent::Greeting, "");
        dispatch_sync(&session, Intent::Help, "");
        dispatch_sync(&session, Intent::Unknown, "");

        assert!(session.cart.is_empty());
        assert_eq!(session.orders.count(), 0);
        assert_eq!(session.chat.messages().len(), 3);
    }
}
