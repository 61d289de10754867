//! Agent entry point and strategy selection.
//!
//! [`ShoppingAgent`] is the single entry for a user turn. It records the
//! message, then routes it: the AI tool-calling path when both external
//! collaborators are configured, the deterministic rule-based path
//! otherwise. An AI failure mid-turn falls back to re-running the same
//! input through the rule-based path, so both strategies must produce
//! acceptable replies for the same input classes.

pub mod ai;
pub mod rules;

pub use ai::{COMPLETION_REPLY, EMPTY_REPLY_FALLBACK};

use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;
use tracing::{instrument, warn};

use crate::config::EngineConfig;
use crate::gemini::{Candidate, Content, GeminiClient, ModelError, ToolConfig};
use crate::intent;
use crate::session::Session;
use crate::tavily::{ResolveError, SearchHit, TavilyClient};

use ai::AiAgent;
use rules::RuleDispatcher;

/// The LLM collaborator: takes the conversation so far plus a system
/// instruction and tool schemas, returns one candidate turn containing
/// text and/or tool-call requests.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Request the next model turn.
    async fn complete(
        &self,
        history: &[Content],
        system: &str,
        tools: &[ToolConfig],
    ) -> Result<Candidate, ModelError>;
}

/// The resolution collaborator: maps a product name to at most one
/// best-guess real purchase page.
#[async_trait]
pub trait ProductResolver: Send + Sync {
    /// Find the purchase page for a product name, if any.
    async fn lookup(&self, product_name: &str) -> Result<Option<SearchHit>, ResolveError>;
}

/// Errors that abort an AI turn. Callers fall back to the rule-based path;
/// these are never shown to the user verbatim.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The completion model failed.
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

/// Simulated latencies for the rule-based path.
///
/// The rule-only path sleeps a randomized "thinking" delay before replying
/// so latency perception stays consistent with the AI path; checkout shows
/// its processing state for a fixed interval before confirming.
#[derive(Debug, Clone)]
pub struct Pacing {
    /// Thinking delay range in milliseconds.
    pub thinking_ms: Range<u64>,
    /// Delay between the checkout processing reply and the confirmation.
    pub checkout: Duration,
}

impl Pacing {
    /// No delays; used by tests.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            thinking_ms: 0..0,
            checkout: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            thinking_ms: 500..1200,
            checkout: Duration::from_millis(2500),
        }
    }
}

/// The conversational shopping agent.
pub struct ShoppingAgent {
    session: Arc<Session>,
    ai: Option<AiAgent>,
    pacing: Pacing,
}

impl ShoppingAgent {
    /// Create a rule-based-only agent.
    #[must_use]
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            ai: None,
            pacing: Pacing::default(),
        }
    }

    /// Create an agent with the AI path enabled.
    #[must_use]
    pub fn with_ai(
        session: Arc<Session>,
        model: Arc<dyn CompletionModel>,
        resolver: Arc<dyn ProductResolver>,
    ) -> Self {
        Self {
            ai: Some(AiAgent::new(Arc::clone(&session), model, resolver)),
            session,
            pacing: Pacing::default(),
        }
    }

    /// Build an agent from configuration: the AI path is enabled only when
    /// both the completion model and the resolution service are configured.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        let session = Arc::new(Session::new());
        match (&config.gemini, &config.tavily) {
            (Some(gemini), Some(tavily)) => Self::with_ai(
                session,
                Arc::new(GeminiClient::new(gemini)),
                Arc::new(TavilyClient::new(tavily)),
            ),
            _ => Self::new(session),
        }
    }

    /// Override the simulated latencies.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// The session this agent operates on.
    #[must_use]
    pub const fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Whether the AI path is enabled.
    #[must_use]
    pub const fn ai_enabled(&self) -> bool {
        self.ai.is_some()
    }

    /// Handle one user turn: record it, then produce a reply through the
    /// AI path or the rule-based path.
    ///
    /// Never fails: an AI-path failure is logged and the same input re-runs
    /// through the rule-based path.
    #[instrument(skip(self, text))]
    pub async fn handle_message(&self, text: &str) {
        self.session.chat.add_user_message(text);
        self.session.chat.set_typing(true);

        match &self.ai {
            Some(ai) => {
                if let Err(error) = ai.process(text).await {
                    warn!(%error, "AI agent failed, falling back to rule-based");
                    self.dispatch_rules(text).await;
                }
            }
            None => {
                self.think().await;
                self.dispatch_rules(text).await;
            }
        }
    }

    async fn dispatch_rules(&self, text: &str) {
        let classification = intent::classify(text);
        RuleDispatcher::new(&self.session, &self.pacing)
            .dispatch(classification.intent, &classification.query)
            .await;
    }

    /// Randomized thinking delay for the rule-only path.
    async fn think(&self) {
        if self.pacing.thinking_ms.is_empty() {
            return;
        }
        let delay = rand::rng().random_range(self.pacing.thinking_ms.clone());
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}
