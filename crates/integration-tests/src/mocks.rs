//! Mock collaborators for driving the engine without a network.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use agentpay_engine::gemini::{
    Candidate, Content, FunctionCall, ModelError, Part, Role, ToolConfig,
};
use agentpay_engine::tavily::{ResolveError, SearchHit};
use agentpay_engine::{CompletionModel, ProductResolver};

/// Build a model turn from parts.
#[must_use]
pub fn model_turn(parts: Vec<Part>) -> Candidate {
    Candidate {
        content: Content {
            role: Role::Model,
            parts,
        },
        finish_reason: Some("STOP".to_string()),
    }
}

/// A text-only model turn.
#[must_use]
pub fn text_turn(text: &str) -> Candidate {
    model_turn(vec![Part::text(text)])
}

/// A model turn containing a single function call.
#[must_use]
pub fn call_turn(name: &str, args: serde_json::Value) -> Candidate {
    let args = args
        .as_object()
        .cloned()
        .unwrap_or_default();
    model_turn(vec![Part::FunctionCall {
        function_call: FunctionCall {
            name: name.to_string(),
            args,
        },
    }])
}

/// Completion model that plays back a fixed script of turns and counts
/// how many times it was called.
pub struct ScriptedModel {
    script: Mutex<VecDeque<Candidate>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    /// Create a model from scripted turns, returned in order.
    #[must_use]
    pub fn new(turns: Vec<Candidate>) -> Self {
        Self {
            script: Mutex::new(turns.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many completions were requested so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionModel for ScriptedModel {
    async fn complete(
        &self,
        _history: &[Content],
        _system: &str,
        _tools: &[ToolConfig],
    ) -> Result<Candidate, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front()
            .ok_or(ModelError::NoCandidate)
    }
}

/// Completion model that requests the same tool call on every round-trip,
/// forever. Exercises the iteration bound.
pub struct EndlessToolModel {
    tool: String,
    calls: AtomicUsize,
}

impl EndlessToolModel {
    /// Create a model that endlessly calls `tool` with empty arguments.
    #[must_use]
    pub fn new(tool: &str) -> Self {
        Self {
            tool: tool.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many completions were requested so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionModel for EndlessToolModel {
    async fn complete(
        &self,
        _history: &[Content],
        _system: &str,
        _tools: &[ToolConfig],
    ) -> Result<Candidate, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(call_turn(&self.tool, serde_json::json!({})))
    }
}

/// Completion model whose every request fails, triggering the rule-based
/// fallback.
pub struct FailingModel;

#[async_trait]
impl CompletionModel for FailingModel {
    async fn complete(
        &self,
        _history: &[Content],
        _system: &str,
        _tools: &[ToolConfig],
    ) -> Result<Candidate, ModelError> {
        Err(ModelError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }
}

/// Resolver that returns the same hit (or none) for every product name.
pub struct StaticResolver {
    hit: Option<SearchHit>,
}

impl StaticResolver {
    /// Resolver that always returns the given hit.
    #[must_use]
    pub const fn with_hit(hit: SearchHit) -> Self {
        Self { hit: Some(hit) }
    }

    /// Resolver that never finds a purchase page.
    #[must_use]
    pub const fn empty() -> Self {
        Self { hit: None }
    }
}

#[async_trait]
impl ProductResolver for StaticResolver {
    async fn lookup(&self, _product_name: &str) -> Result<Option<SearchHit>, ResolveError> {
        Ok(self.hit.clone())
    }
}

/// A plausible product-page search hit.
#[must_use]
pub fn product_page_hit() -> SearchHit {
    SearchHit {
        title: "JBL Vibe Buds True Wireless Earbuds - Amazon.com".to_string(),
        url: "https://www.amazon.com/JBL-Vibe-Buds/dp/B09V4QZPXW/".to_string(),
        content: "True wireless earbuds with JBL Deep Bass Sound, $49.95, 32 hours of battery."
            .to_string(),
        score: 0.93,
    }
}
