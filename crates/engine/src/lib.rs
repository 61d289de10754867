//! AgentPay Engine - the agent orchestration engine.
//!
//! Turns free-text shopping requests into cart and order mutations through
//! two interchangeable strategies:
//!
//! - A deterministic rule-based path: regex intent classification
//!   ([`intent`]) feeding a per-intent dispatcher ([`agent::rules`]).
//! - An LLM-driven tool-calling loop ([`agent::ai`]): bounded multi-turn
//!   protocol against a completion model, with a tool executor ([`tools`])
//!   that mutates the session stores and resolves real purchase URLs for
//!   web search results ([`tavily`]).
//!
//! The [`agent::ShoppingAgent`] entry point selects the AI path when both
//! external collaborators are configured and falls back to the rule-based
//! path when the AI path fails mid-turn.
//!
//! # State
//!
//! All state is in-memory and scoped to a [`session::Session`]: the cart,
//! order history, and chat transcript live in the session's stores; the
//! LLM conversation history and last search results are owned by the AI
//! orchestrator. Nothing persists across restarts.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod agent;
pub mod catalog;
pub mod config;
pub mod gemini;
pub mod intent;
pub mod session;
pub mod stores;
pub mod tavily;
pub mod tools;

pub use agent::{AgentError, CompletionModel, Pacing, ProductResolver, ShoppingAgent};
pub use config::EngineConfig;
pub use session::Session;
