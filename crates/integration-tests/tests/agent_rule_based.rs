//! End-to-end scenarios for the deterministic rule-based path.
//!
//! Each test drives the public `ShoppingAgent` API with no AI collaborators
//! configured, and observes effects through the session stores.

use std::sync::Arc;

use agentpay_core::{MessageRole, RichContent};
use agentpay_engine::{Pacing, Session, ShoppingAgent};

fn rule_agent() -> ShoppingAgent {
    ShoppingAgent::new(Arc::new(Session::new())).with_pacing(Pacing::instant())
}

// =============================================================================
// Browse / Search
// =============================================================================

#[tokio::test]
async fn test_show_me_products_returns_full_catalog() {
    let agent = rule_agent();
    let catalog_size = agent.session().catalog.len();

    agent.handle_message("show me products").await;

    let last = agent.session().chat.last().expect("reply emitted");
    assert_eq!(last.role, MessageRole::Agent);
    assert!(last.content.contains("product catalog"));
    match last.rich_content {
        Some(RichContent::Products { ref products }) => {
            assert_eq!(products.len(), catalog_size, "full catalog attached");
        }
        ref other => panic!("expected products content, got {other:?}"),
    }
}

#[tokio::test]
async fn test_browse_category_filters_catalog() {
    let agent = rule_agent();

    agent.handle_message("show me electronics").await;

    let last = agent.session().chat.last().expect("reply emitted");
    match last.rich_content {
        Some(RichContent::Products { ref products }) => {
            assert!(!products.is_empty());
            assert!(products.iter().all(|p| p.category == "Electronics"));
        }
        ref other => panic!("expected products content, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_without_results_suggests_browsing() {
    let agent = rule_agent();

    agent.handle_message("find a zeppelin").await;

    let last = agent.session().chat.last().expect("reply emitted");
    assert!(last.content.contains("couldn't find anything"));
    assert!(last.rich_content.is_none());
}

// =============================================================================
// Add to cart
// =============================================================================

#[tokio::test]
async fn test_add_wireless_mouse_adds_exactly_one_unit() {
    let agent = rule_agent();

    agent.handle_message("add wireless mouse").await;

    assert_eq!(agent.session().cart.item_count(), 1);
    let last = agent.session().chat.last().expect("reply emitted");
    assert!(
        last.content.contains("Wireless Mouse"),
        "reply names the exact product: {}",
        last.content
    );
}

#[tokio::test]
async fn test_add_matches_against_injected_catalog() {
    // Sessions take an injected catalog; matching runs against it, not the
    // built-in one.
    let catalog = agentpay_engine::catalog::builtin_catalog()
        .into_iter()
        .filter(|p| p.name == "Wireless Mouse")
        .collect::<Vec<_>>();
    let agent = ShoppingAgent::new(Arc::new(Session::with_catalog(catalog)))
        .with_pacing(Pacing::instant());

    agent.handle_message("add wireless mouse").await;
    assert_eq!(agent.session().cart.item_count(), 1);

    agent.handle_message("add bluetooth speaker").await;
    assert_eq!(agent.session().cart.item_count(), 1, "not in this catalog");
}

#[tokio::test]
async fn test_add_unmatched_product_leaves_cart_alone() {
    let agent = rule_agent();

    agent.handle_message("add a flux capacitor").await;

    assert!(agent.session().cart.is_empty());
    let last = agent.session().chat.last().expect("reply emitted");
    assert!(last.content.contains("couldn't find a product"));
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_with_empty_cart_creates_no_order() {
    let agent = rule_agent();

    agent.handle_message("checkout").await;

    assert_eq!(agent.session().orders.count(), 0);
    let last = agent.session().chat.last().expect("reply emitted");
    assert!(last.content.contains("cart is empty"));
}

#[tokio::test]
async fn test_checkout_emits_processing_then_order_and_clears_cart() {
    let agent = rule_agent();

    agent.handle_message("add wireless mouse").await;
    agent.handle_message("checkout").await;

    let messages = agent.session().chat.messages();
    // user, add reply, user, processing reply, order reply
    assert_eq!(messages.len(), 5);

    let agent_replies: Vec<_> = messages
        .iter()
        .filter(|m| m.role == MessageRole::Agent)
        .collect();
    assert_eq!(
        agent_replies.get(1).and_then(|m| m.rich_content.clone()),
        Some(RichContent::Processing),
        "interim reply is processing-tagged"
    );
    assert!(
        matches!(
            agent_replies.get(2).and_then(|m| m.rich_content.clone()),
            Some(RichContent::Order { .. })
        ),
        "final reply is order-tagged"
    );

    assert!(agent.session().cart.is_empty(), "cart cleared");
    assert_eq!(agent.session().orders.count(), 1);
}

#[tokio::test]
async fn test_buy_products_is_treated_as_checkout() {
    // Matches both a checkout phrase and a browse phrase; checkout wins.
    let agent = rule_agent();

    agent.handle_message("buy products").await;

    let last = agent.session().chat.last().expect("reply emitted");
    assert!(
        last.content.contains("nothing to checkout"),
        "checkout handler replied: {}",
        last.content
    );
}

// =============================================================================
// Orders / misc
// =============================================================================

#[tokio::test]
async fn test_order_status_reports_latest_order() {
    let agent = rule_agent();

    agent.handle_message("order status").await;
    let last = agent.session().chat.last().expect("reply emitted");
    assert!(last.content.contains("don't have any orders"));

    agent.handle_message("add bluetooth speaker").await;
    agent.handle_message("checkout").await;
    agent.handle_message("order status").await;

    let last = agent.session().chat.last().expect("reply emitted");
    assert!(last.content.contains("1 order(s)"));
    match last.rich_content {
        Some(RichContent::Order { ref order }) => {
            assert_eq!(
                Some(&order.id),
                agent.session().orders.latest().map(|o| o.id).as_ref()
            );
        }
        ref other => panic!("expected order content, got {other:?}"),
    }
}

#[tokio::test]
async fn test_greeting_clears_typing_and_mutates_nothing() {
    let agent = rule_agent();

    agent.handle_message("hello!").await;

    assert!(!agent.session().chat.is_typing());
    assert!(agent.session().cart.is_empty());
    assert_eq!(agent.session().orders.count(), 0);
    let last = agent.session().chat.last().expect("reply emitted");
    assert!(last.content.contains("Welcome to AgentPay"));
}

#[tokio::test]
async fn test_unknown_input_lists_example_commands() {
    let agent = rule_agent();

    agent.handle_message("colorless green ideas").await;

    let last = agent.session().chat.last().expect("reply emitted");
    assert!(last.content.contains("not sure I understood"));
    assert!(last.content.contains("show products"));
}
