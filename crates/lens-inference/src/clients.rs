//! The two prompt clients: document analysis and free-form Q&A.
//!
//! Each call is independent. Neither client keeps conversation memory, and the
//! assistant never sees the analysed document.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument};

use lens_core::{defaults, GenerationBackend, Result};

use crate::prompts::{ANALYSIS_SYSTEM_PROMPT, ASSISTANT_SYSTEM_PROMPT};

/// Sends a whole document for structured analysis.
#[derive(Clone)]
pub struct AnalysisClient {
    backend: Arc<dyn GenerationBackend>,
    max_tokens: u32,
}

impl AnalysisClient {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            max_tokens: defaults::ANALYSIS_MAX_TOKENS,
        }
    }

    /// Override the output-token ceiling.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Analyse `document_text` and return the raw reply.
    ///
    /// The text is sent verbatim as the user message. A reply cut off at the
    /// token ceiling is still returned.
    #[instrument(
        skip(self, document_text),
        fields(
            subsystem = "inference",
            component = "analysis_client",
            op = "analyze",
            model = %self.backend.model_name(),
            prompt_len = document_text.len(),
        )
    )]
    pub async fn analyze(&self, document_text: &str) -> Result<String> {
        let start = Instant::now();
        let generation = self
            .backend
            .generate_with_system(ANALYSIS_SYSTEM_PROMPT, document_text, self.max_tokens)
            .await?;

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            response_len = generation.content.len(),
            truncated = generation.is_truncated(),
            "Analysis reply received"
        );
        Ok(generation.content)
    }
}

/// Answers free-form questions with a generic assistant persona.
#[derive(Clone)]
pub struct AssistantClient {
    backend: Arc<dyn GenerationBackend>,
    max_tokens: u32,
}

impl AssistantClient {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            max_tokens: defaults::ASSISTANT_MAX_TOKENS,
        }
    }

    /// Override the output-token ceiling.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    #[instrument(
        skip(self, question),
        fields(
            subsystem = "inference",
            component = "assistant_client",
            op = "ask",
            model = %self.backend.model_name(),
            prompt_len = question.len(),
        )
    )]
    pub async fn ask(&self, question: &str) -> Result<String> {
        let start = Instant::now();
        let generation = self
            .backend
            .generate_with_system(ASSISTANT_SYSTEM_PROMPT, question, self.max_tokens)
            .await?;

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            response_len = generation.content.len(),
            "Answer received"
        );
        Ok(generation.content)
    }
}
