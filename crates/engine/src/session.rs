//! The session context threaded through every engine call.

use agentpay_core::Product;

use crate::catalog;
use crate::stores::{CartStore, ChatStore, OrderStore};

/// One conversation's worth of state: the product catalog plus the cart,
/// order, and chat collaborators.
///
/// Sessions are explicitly owned and injected rather than global, so
/// multiple independent sessions can coexist and tests stay deterministic.
/// All state is in-memory and lives only as long as the session.
#[derive(Debug)]
pub struct Session {
    /// The product catalog the rule-based path browses and matches.
    pub catalog: Vec<Product>,
    /// The live cart.
    pub cart: CartStore,
    /// Order history, newest first.
    pub orders: OrderStore,
    /// Chat transcript and typing flag.
    pub chat: ChatStore,
}

impl Session {
    /// Create a session seeded with the built-in catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(catalog::builtin_catalog())
    }

    /// Create a session with a custom catalog.
    #[must_use]
    pub fn with_catalog(catalog: Vec<Product>) -> Self {
        Self {
            catalog,
            cart: CartStore::new(),
            orders: OrderStore::new(),
            chat: ChatStore::new(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
