//! Core traits for legal-lens abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::models::ExtractionStrategy;

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// Reply from a single chat-completion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    /// Raw reply text.
    pub content: String,
    /// Finish reason as reported by the endpoint ("stop", "length", ...).
    pub finish_reason: Option<String>,
}

impl Generation {
    /// True when the reply was cut off at the output-token ceiling.
    pub fn is_truncated(&self) -> bool {
        self.finish_reason.as_deref() == Some("length")
    }
}

/// Backend for text generation.
///
/// Every call is independent: one system message, one user message, no
/// conversation memory.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate a reply to `prompt` under the `system` instruction, bounded to
    /// `max_tokens` output tokens.
    async fn generate_with_system(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<Generation>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

// =============================================================================
// EXTRACTION TRAITS
// =============================================================================

/// Result of extracting text from an upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted text content.
    pub extracted_text: String,
    /// Metadata about the extraction (format-specific).
    pub metadata: JsonValue,
}

/// Adapter for extracting text from an uploaded file.
///
/// Each adapter handles one extraction strategy. Adapters are registered in an
/// `ExtractionRegistry` and dispatched on the upload's declared MIME type.
#[async_trait]
pub trait ExtractionAdapter: Send + Sync {
    /// The extraction strategy this adapter handles.
    fn strategy(&self) -> ExtractionStrategy;

    /// Extract text from raw file data.
    async fn extract(&self, data: &[u8], filename: &str) -> Result<ExtractionResult>;

    /// Human-readable name of this adapter.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_truncated() {
        let gen = Generation {
            content: "partial".to_string(),
            finish_reason: Some("length".to_string()),
        };
        assert!(gen.is_truncated());
    }

    #[test]
    fn test_generation_not_truncated() {
        let gen = Generation {
            content: "done".to_string(),
            finish_reason: Some("stop".to_string()),
        };
        assert!(!gen.is_truncated());

        let unknown = Generation {
            content: "done".to_string(),
            finish_reason: None,
        };
        assert!(!unknown.is_truncated());
    }
}
