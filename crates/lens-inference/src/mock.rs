//! Mock chat backend for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lens_inference::mock::MockChatBackend;
//! use lens_inference::AssistantClient;
//!
//! #[tokio::test]
//! async fn test_with_mock_backend() {
//!     let backend = MockChatBackend::new().with_fixed_response("Test response");
//!     let client = AssistantClient::new(Arc::new(backend.clone()));
//!
//!     assert_eq!(client.ask("hi").await.unwrap(), "Test response");
//!     assert_eq!(backend.call_count(), 1);
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use lens_core::{Error, Generation, GenerationBackend, Result};

/// Mock chat backend for testing.
#[derive(Clone)]
pub struct MockChatBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    model: String,
    fixed_responses: HashMap<String, String>,
    default_response: String,
    finish_reason: Option<String>,
    latency_ms: u64,
    prompt_latency_ms: HashMap<String, u64>,
    fail_all: bool,
    failing_prompts: HashSet<String>,
}

/// One recorded `generate_with_system` call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub timestamp: Instant,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            model: "mock-chat".to_string(),
            fixed_responses: HashMap::new(),
            default_response: "Mock response".to_string(),
            finish_reason: Some("stop".to_string()),
            latency_ms: 0,
            prompt_latency_ms: HashMap::new(),
            fail_all: false,
            failing_prompts: HashSet::new(),
        }
    }
}

impl MockChatBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the reply returned for any prompt without a mapping.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Reply with `output` when the user message equals `input`.
    pub fn with_response_mapping(
        mut self,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .fixed_responses
            .insert(input.into(), output.into());
        self
    }

    /// Finish reason reported with every reply.
    pub fn with_finish_reason(mut self, reason: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).finish_reason = Some(reason.into());
        self
    }

    /// Set simulated latency for all calls.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    /// Set simulated latency for one specific user message.
    pub fn with_prompt_latency_ms(mut self, input: impl Into<String>, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config)
            .prompt_latency_ms
            .insert(input.into(), latency_ms);
        self
    }

    /// Make every call fail with a remote error.
    pub fn with_failure(mut self, fail: bool) -> Self {
        Arc::make_mut(&mut self.config).fail_all = fail;
        self
    }

    /// Make calls with this user message fail with a remote error.
    pub fn with_failing_prompt(mut self, input: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config)
            .failing_prompts
            .insert(input.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).model = model.into();
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    fn log_call(&self, system: &str, prompt: &str, max_tokens: u32) {
        self.call_log.lock().unwrap().push(MockCall {
            system: system.to_string(),
            prompt: prompt.to_string(),
            max_tokens,
            timestamp: Instant::now(),
        });
    }

    async fn simulate_latency(&self, prompt: &str) {
        let latency_ms = self
            .config
            .prompt_latency_ms
            .get(prompt)
            .copied()
            .unwrap_or(self.config.latency_ms);
        if latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(latency_ms)).await;
        }
    }
}

impl Default for MockChatBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockChatBackend {
    async fn generate_with_system(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<Generation> {
        self.log_call(system, prompt, max_tokens);
        self.simulate_latency(prompt).await;

        if self.config.fail_all || self.config.failing_prompts.contains(prompt) {
            return Err(Error::Remote("Simulated failure for testing".to_string()));
        }

        let content = self
            .config
            .fixed_responses
            .get(prompt)
            .cloned()
            .unwrap_or_else(|| self.config.default_response.clone());

        Ok(Generation {
            content,
            finish_reason: self.config.finish_reason.clone(),
        })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
