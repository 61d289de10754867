//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional. The AI path is enabled only when BOTH the
//! completion model and the URL resolution service are configured;
//! otherwise the engine routes every message through the deterministic
//! rule-based path.
//!
//! ## Completion model (Gemini)
//! - `GEMINI_API_KEY` - Gemini API key
//! - `GEMINI_MODEL` - Model ID (default: gemini-3-flash-preview)
//! - `GEMINI_BASE_URL` - API base URL override (for proxies/tests)
//!
//! ## URL resolution (Tavily)
//! - `TAVILY_API_KEY` - Tavily API key
//! - `TAVILY_BASE_URL` - API base URL override (for proxies/tests)

use std::env;

use secrecy::SecretString;

const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TAVILY_BASE_URL: &str = "https://api.tavily.com";

/// Gemini completion model configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key (never logged).
    pub api_key: SecretString,
    /// Model ID (e.g., "gemini-3-flash-preview").
    pub model: String,
    /// API base URL.
    pub base_url: String,
}

impl GeminiConfig {
    /// Create a config with the default model and base URL.
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

/// Tavily search configuration for product URL resolution.
#[derive(Debug, Clone)]
pub struct TavilyConfig {
    /// API key (never logged).
    pub api_key: SecretString,
    /// API base URL.
    pub base_url: String,
}

impl TavilyConfig {
    /// Create a config with the default base URL.
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_TAVILY_BASE_URL.to_string(),
        }
    }
}

/// Engine configuration.
///
/// Collaborator absence is a routing decision, not an error: a missing key
/// simply disables the AI path.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Completion model configuration, when configured.
    pub gemini: Option<GeminiConfig>,
    /// URL resolution configuration, when configured.
    pub tavily: Option<TavilyConfig>,
}

impl EngineConfig {
    /// Load configuration from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let gemini = non_empty_var("GEMINI_API_KEY").map(|key| GeminiConfig {
            api_key: key.into(),
            model: non_empty_var("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: non_empty_var("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
        });

        let tavily = non_empty_var("TAVILY_API_KEY").map(|key| TavilyConfig {
            api_key: key.into(),
            base_url: non_empty_var("TAVILY_BASE_URL")
                .unwrap_or_else(|| DEFAULT_TAVILY_BASE_URL.to_string()),
        });

        Self { gemini, tavily }
    }

    /// Whether the AI path can run (both collaborators configured).
    #[must_use]
    pub const fn ai_available(&self) -> bool {
        self.gemini.is_some() && self.tavily.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
