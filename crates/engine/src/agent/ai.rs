//! The AI tool-calling orchestrator.
//!
//! Drives the bounded multi-turn protocol: send the conversation plus a
//! system instruction and tool schemas, execute any requested tools, feed
//! the results back, and repeat until the model produces a final text-only
//! answer or the iteration cap is hit. The conversation history and the
//! last search result set live here, not in the session stores, and are
//! append-only for the life of the agent.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use agentpay_core::{Product, RichContent};

use crate::gemini::{Content, FunctionCall, Part, Role};
use crate::session::Session;
use crate::tools::{ToolExecutor, shopping_tools};

use super::{AgentError, CompletionModel, ProductResolver};

/// Hard cap on model round-trips within one user turn. Bounds a model that
/// never stops calling tools.
const MAX_TOOL_ITERATIONS: usize = 5;

/// Reply used when the model's final turn carries no text.
pub const EMPTY_REPLY_FALLBACK: &str = "I'm here to help! Try asking me to search for products.";

/// Reply emitted when the iteration cap is reached without a final answer.
pub const COMPLETION_REPLY: &str =
    "I've completed the action. Let me know if you need anything else!";

const SYSTEM_PROMPT: &str = "You are a friendly shopping assistant for AgentPay, an AI-powered e-commerce store.
You help users find products, manage their cart, and complete purchases.

Guidelines:
- Be concise and helpful. Keep responses to 1-3 sentences.
- When users ask to find/search for products, use the search_products function. You MUST include specific product recommendations in the \"products\" array — use real product names with brand names (e.g., \"JBL Vibe Buds True Wireless Earbuds\") and accurate approximate prices. Recommend 3-5 products.
- When users want to add something to cart, use add_to_cart. If they say \"add the first one\" or \"add #2\", refer to the last search results by index (0-based).
- When users ask about their cart, use view_cart.
- When users want to checkout, use checkout.
- Always confirm actions with the user (e.g., \"Added X to your cart!\").
- If a search returns no results, suggest broadening the search terms.
- Be natural and conversational, not robotic.";

/// Conversation state owned by the orchestrator: the model-facing turn
/// history plus the most recent search result set (for index-based
/// references like "add the first one").
#[derive(Debug, Default)]
struct Conversation {
    history: Vec<Content>,
    last_search: Vec<Product>,
}

/// The AI-driven agent for one session.
pub(crate) struct AiAgent {
    session: Arc<Session>,
    model: Arc<dyn CompletionModel>,
    resolver: Arc<dyn ProductResolver>,
    // Held across model awaits; also serializes overlapping turns on the
    // same session.
    conversation: Mutex<Conversation>,
}

impl AiAgent {
    pub(crate) fn new(
        session: Arc<Session>,
        model: Arc<dyn CompletionModel>,
        resolver: Arc<dyn ProductResolver>,
    ) -> Self {
        Self {
            session,
            model,
            resolver,
            conversation: Mutex::new(Conversation::default()),
        }
    }

    /// Process one user turn through the tool-calling loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the completion model fails; the caller falls
    /// back to the rule-based path for the same input.
    #[instrument(skip(self, user_text))]
    pub(crate) async fn process(&self, user_text: &str) -> Result<(), AgentError> {
        let mut convo = self.conversation.lock().await;

        convo.history.push(Content::user_text(user_text));

        // Snapshot of cart and search state, rendered once per turn.
        let system = format!(
            "{SYSTEM_PROMPT}{}{}",
            cart_context(&self.session),
            search_context(&convo.last_search)
        );
        let tools = shopping_tools();

        let mut pending_rich_content: Option<RichContent> = None;

        for _ in 0..MAX_TOOL_ITERATIONS {
            let candidate = self
                .model
                .complete(&convo.history, &system, &tools)
                .await?;

            let calls = extract_function_calls(&candidate.content.parts);
            let text = extract_text(&candidate.content.parts);

            info!(
                function_calls = calls.len(),
                finish_reason = ?candidate.finish_reason,
                "model response received"
            );

            if calls.is_empty() {
                convo.history.push(candidate.content);
                let reply = if text.trim().is_empty() {
                    EMPTY_REPLY_FALLBACK.to_string()
                } else {
                    text
                };
                self.session
                    .chat
                    .add_agent_message(reply, pending_rich_content);
                return Ok(());
            }

            convo.history.push(candidate.content.clone());

            let executor = ToolExecutor::new(&self.session, self.resolver.as_ref());
            let mut response_parts = Vec::with_capacity(calls.len());

            for call in calls {
                let outcome = executor
                    .execute(&call.name, &call.args, &mut convo.last_search)
                    .await;

                // Later structured attachments overwrite earlier ones; only
                // the most recent per turn reaches the reply.
                if let Some(rich) = outcome.rich_content {
                    pending_rich_content = Some(rich);
                }

                response_parts.push(Part::function_response(&call.name, outcome.result));
            }

            // One synthetic turn carrying every tool result of this batch.
            convo.history.push(Content {
                role: Role::User,
                parts: response_parts,
            });
        }

        warn!(
            cap = MAX_TOOL_ITERATIONS,
            "tool-call iteration cap reached without a final answer"
        );
        self.session
            .chat
            .add_agent_message(COMPLETION_REPLY, pending_rich_content);
        Ok(())
    }
}

/// Render the current cart for the system instruction.
fn cart_context(session: &Session) -> String {
    let items = session.cart.items();
    if items.is_empty() {
        return "\nCurrent cart: empty".to_string();
    }

    let item_list = items
        .iter()
        .map(|item| {
            format!(
                "- {} x{} ({} each)",
                item.product.name,
                item.quantity,
                item.product.price.display()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\nCurrent cart ({} items, total {}):\n{item_list}",
        session.cart.item_count(),
        session.cart.total().display()
    )
}

/// Render the last search results for the system instruction.
fn search_context(results: &[Product]) -> String {
    if results.is_empty() {
        return String::new();
    }

    let items = results
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{i}: {} - {}", p.name, p.price.display_or_na()))
        .collect::<Vec<_>>()
        .join("\n");

    format!("\nLast search results:\n{items}")
}

/// All function calls in a model turn, in the order listed.
fn extract_function_calls(parts: &[Part]) -> Vec<FunctionCall> {
    parts
        .iter()
        .filter_map(|part| match part {
            Part::FunctionCall { function_call } => Some(function_call.clone()),
            _ => None,
        })
        .collect()
}

/// All text in a model turn, joined with newlines.
fn extract_text(parts: &[Part]) -> String {
    parts
        .iter()
        .filter_map(|part| match part {
            Part::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
