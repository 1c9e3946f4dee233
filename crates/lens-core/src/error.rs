//! Error types for legal-lens.

use thiserror::Error;

/// Result type alias using legal-lens's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for legal-lens operations.
///
/// Every variant is terminal for the single action that produced it; nothing
/// here is fatal to a session.
#[derive(Error, Debug)]
pub enum Error {
    /// Upload rejected before any content was read.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Document content could not be turned into text.
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Chat-completion endpoint unreachable or returned a failure.
    #[error("Remote error: {0}")]
    Remote(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons an upload is refused up front.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Declared MIME type is neither PDF nor plain text.
    #[error("Unsupported file type '{0}'. Please upload a PDF or text file")]
    UnsupportedType(String),

    /// File is larger than the upload cap.
    #[error("File size too large ({size} bytes, max {max} bytes)")]
    TooLarge { size: u64, max: u64 },
}

/// Reasons a validated upload yields no usable text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Document parsed but contained no text (likely scanned/image-only PDF).
    #[error("No readable text found in PDF - it may be scanned or image-based")]
    EmptyResult,

    /// Document could not be parsed.
    #[error("Failed to extract text from document: {0}")]
    Corrupt(String),
}

impl Error {
    /// True for failures that came from the remote chat-completion boundary.
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Remote(e.to_string())
    }
}
