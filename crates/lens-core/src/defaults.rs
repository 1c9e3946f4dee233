//! Centralized default constants for legal-lens.
//!
//! **This module is the single source of truth** for shared default values.
//! Several of them (the fallback metrics, the Q&A error marker) are observable
//! behaviour, so changing them changes what users see.

use crate::models::RiskLevel;

// =============================================================================
// UPLOADS
// =============================================================================

/// Maximum accepted upload size (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// MIME type for PDF uploads.
pub const MIME_PDF: &str = "application/pdf";

/// MIME type for plain-text uploads.
pub const MIME_TEXT: &str = "text/plain";

// =============================================================================
// INFERENCE
// =============================================================================

/// Default OpenAI-compatible endpoint (Hugging Face router).
pub const BASE_URL: &str = "https://router.huggingface.co/v1";

/// Default chat model.
pub const MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";

/// Output-token ceiling for document analysis.
pub const ANALYSIS_MAX_TOKENS: u32 = 350;

/// Output-token ceiling for the Q&A assistant.
pub const ASSISTANT_MAX_TOKENS: u32 = 512;

/// HTTP request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 300;

// =============================================================================
// METRICS
// =============================================================================

/// Privacy score used when the reply carries no `Privacy Score:` line.
pub const PRIVACY_SCORE: u32 = 30;

/// Data usage risk used when the reply carries no `Data Usage Risk:` line.
pub const DATA_USAGE_RISK: RiskLevel = RiskLevel::High;

/// Security level used when the reply carries no `Overall Security Level:` line.
pub const SECURITY_LEVEL: RiskLevel = RiskLevel::Low;

// =============================================================================
// Q&A
// =============================================================================

/// Answer recorded in a history entry whose remote call failed.
pub const QA_ERROR_MESSAGE: &str = "Error processing your question.";
