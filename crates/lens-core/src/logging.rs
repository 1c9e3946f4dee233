//! Structured logging field name constants for legal-lens.
//!
//! All crates use these constants for consistent structured logging fields.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Action failed in a way the user cannot recover from by retrying |
//! | WARN  | Recoverable issue (remote failure, truncated reply, rejected upload) |
//! | INFO  | Operation completions (upload accepted, analysis done, answer received) |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-line / per-page iteration |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "extract", "inference", "session"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "pdf_text", "openai", "coordinator", "interpreter"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "ingest", "analyze", "ask", "submit_question"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Uploaded file name.
pub const FILENAME: &str = "filename";

/// Declared MIME type of an upload.
pub const MIME_TYPE: &str = "mime_type";

/// Index of a Q&A history entry.
pub const ENTRY_INDEX: &str = "entry_index";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Byte size of an upload.
pub const SIZE_BYTES: &str = "size_bytes";

/// Number of PDF pages processed.
pub const PAGE_COUNT: &str = "page_count";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

/// Number of display blocks produced from a reply.
pub const BLOCK_COUNT: &str = "block_count";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for inference.
pub const MODEL: &str = "model";

/// Output-token ceiling sent with a request.
pub const MAX_TOKENS: &str = "max_tokens";

/// Finish reason reported by the endpoint.
pub const FINISH_REASON: &str = "finish_reason";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
