//! OpenAI-compatible chat completion backend.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use lens_core::{defaults, Error, Generation, GenerationBackend, Result};

use super::error::{to_lens_error, OpenAIErrorCode};
use super::types::*;

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication (optional for local endpoints).
    pub api_key: Option<String>,
    /// Model to use for generation.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            api_key: None,
            model: defaults::MODEL.to_string(),
            timeout_seconds: defaults::TIMEOUT_SECS,
        }
    }
}

/// OpenAI-compatible chat completion backend.
pub struct OpenAIBackend {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIBackend {
    /// Create a new backend with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "openai",
            base_url = %config.base_url,
            model = %config.model,
            timeout_seconds = config.timeout_seconds,
            "Initializing chat backend"
        );

        Ok(Self { client, config })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(OpenAIConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    /// Build a request with authentication if configured.
    fn build_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let mut req = self.client.post(&url);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        req.header("Content-Type", "application/json")
    }

    /// Turn a non-success response into a remote error, preferring the
    /// endpoint's own error message when the body carries one.
    async fn error_from_response(response: reqwest::Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let (error_type, message) = match serde_json::from_str::<OpenAIErrorResponse>(&body) {
            Ok(parsed) => (parsed.error.error_type, parsed.error.message),
            Err(_) if body.trim().is_empty() => (String::new(), "Unknown error".to_string()),
            Err(_) => (String::new(), body.trim().to_string()),
        };

        let code = OpenAIErrorCode::from_response(status.as_u16(), &error_type);
        warn!(
            status = status.as_u16(),
            ?code,
            error = %message,
            "Chat endpoint returned an error"
        );
        to_lens_error(code, &format!("endpoint returned {}: {}", status, message))
    }
}

#[async_trait]
impl GenerationBackend for OpenAIBackend {
    #[instrument(
        skip(self, system, prompt),
        fields(
            subsystem = "inference",
            component = "openai",
            op = "chat_completion",
            model = %self.config.model,
            prompt_len = prompt.len(),
        )
    )]
    async fn generate_with_system(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<Generation> {
        let start = Instant::now();

        let mut messages = Vec::with_capacity(2);
        if !system.is_empty() {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(prompt));

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            temperature: None,
            max_tokens: Some(max_tokens),
            stream: false,
        };

        let response = self
            .build_request("/chat/completions")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Chat request failed");
                Error::Remote(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Remote(format!("Failed to parse response: {}", e)))?;

        let choice = result
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Remote("Response contained no choices".to_string()))?;

        let generation = Generation {
            content: choice.message.content,
            finish_reason: choice.finish_reason,
        };

        if generation.is_truncated() {
            warn!(
                max_tokens,
                response_len = generation.content.len(),
                "Reply truncated at the output-token ceiling"
            );
        }

        debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            response_len = generation.content.len(),
            finish_reason = generation.finish_reason.as_deref().unwrap_or("none"),
            "Generation complete"
        );

        Ok(generation)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
