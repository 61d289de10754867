//! In-memory state collaborators.
//!
//! These stores own the cart, order history, and chat transcript. The
//! orchestration engine never reaches into their contents directly; every
//! mutation goes through the operations here, each of which is atomic with
//! respect to a single turn.

pub mod cart;
pub mod chat;
pub mod orders;

pub use cart::CartStore;
pub use chat::ChatStore;
pub use orders::OrderStore;
