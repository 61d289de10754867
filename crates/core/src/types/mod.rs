//! Core types for AgentPay.
//!
//! This module provides the domain types shared by the engine and its tests.

pub mod chat;
pub mod order;
pub mod price;
pub mod product;

pub use chat::{ChatMessage, MessageRole, RichContent};
pub use order::{Order, OrderStatus};
pub use price::{CurrencyCode, Price};
pub use product::{CartItem, Product, ProductSource};
