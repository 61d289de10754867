//! Chat messages and the structured content attached to agent replies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::order::Order;
use super::price::Price;
use super::product::{CartItem, Product};

/// Structured content attached to an agent reply for rich rendering.
///
/// Exactly one variant is active per reply; a reply without rich content is
/// plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichContent {
    /// A product list (search or browse results).
    Products {
        /// The products to render.
        products: Vec<Product>,
    },
    /// A cart summary.
    Cart {
        /// Current cart items.
        items: Vec<CartItem>,
        /// Cart total.
        total: Price,
    },
    /// An order receipt.
    Order {
        /// The placed order.
        order: Order,
    },
    /// A transient "payment processing" marker with no payload.
    Processing,
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Agent,
}

/// A single message in the chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier.
    pub id: Uuid,
    /// Message author.
    pub role: MessageRole,
    /// Message text (may contain markdown).
    pub content: String,
    /// Optional structured content for rich rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rich_content: Option<RichContent>,
    /// When the message was recorded.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content.into(), None)
    }

    /// Create an agent message with optional rich content.
    #[must_use]
    pub fn agent(content: impl Into<String>, rich_content: Option<RichContent>) -> Self {
        Self::new(MessageRole::Agent, content.into(), rich_content)
    }

    fn new(role: MessageRole, content: String, rich_content: Option<RichContent>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            rich_content,
            timestamp: Utc::now(),
        }
    }
}
