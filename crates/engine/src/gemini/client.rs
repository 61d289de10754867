//! Gemini API client for chat completions with function calling.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::agent::CompletionModel;
use crate::config::GeminiConfig;

use super::error::{ApiErrorResponse, ModelError};
use super::types::{
    Candidate, Content, GenerateRequest, GenerateResponse, SystemInstruction, ToolConfig,
};

/// Gemini API client.
///
/// Non-streaming: a tool use loop needs the complete response before it can
/// decide whether to execute tools or stop.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    model: String,
    api_key: SecretString,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn new(config: &GeminiConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(GeminiClientInner {
                client,
                model: config.model.clone(),
                api_key: config.api_key.clone(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
            }),
        }
    }

    /// Send a conversation plus tool schemas and get a complete response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error
    /// response.
    #[instrument(skip(self, contents, system, tools), fields(model = %self.inner.model))]
    pub async fn generate(
        &self,
        contents: Vec<Content>,
        system: String,
        tools: Vec<ToolConfig>,
    ) -> Result<GenerateResponse, ModelError> {
        let request = GenerateRequest {
            contents,
            system_instruction: SystemInstruction::from_text(system),
            tools,
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.inner.base_url, self.inner.model
        );

        let response = self
            .inner
            .client
            .post(&url)
            .query(&[("key", self.inner.api_key.expose_secret())])
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle a response, classifying error statuses.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<GenerateResponse, ModelError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| ModelError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(Self::handle_error_status(status, response).await)
        }
    }

    /// Classify an error status code.
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ModelError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return ModelError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return ModelError::Unauthorized("Invalid API key".to_string());
        }

        match response.text().await {
            Ok(body) => {
                if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                    ModelError::Api {
                        status: status.as_u16(),
                        message: api_error.error.message,
                    }
                } else {
                    ModelError::Api {
                        status: status.as_u16(),
                        message: body,
                    }
                }
            }
            Err(e) => ModelError::Http(e),
        }
    }
}

#[async_trait]
impl CompletionModel for GeminiClient {
    async fn complete(
        &self,
        history: &[Content],
        system: &str,
        tools: &[ToolConfig],
    ) -> Result<Candidate, ModelError> {
        let response = self
            .generate(history.to_vec(), system.to_string(), tools.to_vec())
            .await?;

        response
            .candidates
            .into_iter()
            .next()
            .ok_or(ModelError::NoCandidate)
    }
}
