//! Data model shared across legal-lens crates.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::file_safety::SupportedMime;

// =============================================================================
// UPLOADS
// =============================================================================

/// A file as handed over by the file picker, before validation.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    /// MIME type declared by the picker (not sniffed from the bytes).
    pub declared_mime: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        filename: impl Into<String>,
        declared_mime: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            declared_mime: declared_mime.into(),
            data: data.into(),
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

/// A successfully ingested document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub filename: String,
    #[serde(skip)]
    pub raw_bytes: Vec<u8>,
    pub declared_mime: String,
    pub size_bytes: u64,
    pub extracted_text: String,
}

impl UploadedDocument {
    /// Character count of the extracted text, as shown next to the file name.
    pub fn char_count(&self) -> usize {
        self.extracted_text.chars().count()
    }
}

/// Strategy used to pull text out of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Plain text, decoded as UTF-8.
    #[default]
    TextNative,
    /// Page-by-page PDF text extraction.
    PdfText,
}

impl From<SupportedMime> for ExtractionStrategy {
    fn from(mime: SupportedMime) -> Self {
        match mime {
            SupportedMime::PlainText => Self::TextNative,
            SupportedMime::Pdf => Self::PdfText,
        }
    }
}

// =============================================================================
// ANALYSIS
// =============================================================================

/// Three-level rating used for data usage risk and security level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Metrics pulled out of an analysis reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Nominally 0-100; not range-checked.
    pub privacy_score: u32,
    pub data_usage_risk: RiskLevel,
    pub security_level: RiskLevel,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            privacy_score: defaults::PRIVACY_SCORE,
            data_usage_risk: defaults::DATA_USAGE_RISK,
            security_level: defaults::SECURITY_LEVEL,
        }
    }
}

/// One display unit derived from one line of a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Block {
    Heading1(String),
    Heading2(String),
    Bullet(String),
    Paragraph(String),
}

impl Block {
    pub fn text(&self) -> &str {
        match self {
            Block::Heading1(t) | Block::Heading2(t) | Block::Bullet(t) | Block::Paragraph(t) => t,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading1(_) | Block::Heading2(_))
    }
}

/// Structured result of one completed analysis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The unparsed reply the blocks and metrics were derived from.
    pub raw_reply: String,
    pub blocks: Vec<Block>,
    pub metrics: Metrics,
}

// =============================================================================
// Q&A
// =============================================================================

/// State of the answer slot in a Q&A history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum QaAnswer {
    Pending,
    Answered(String),
    Failed(String),
}

impl QaAnswer {
    pub fn is_pending(&self) -> bool {
        matches!(self, QaAnswer::Pending)
    }

    /// Text to show for this answer, if resolved.
    pub fn text(&self) -> Option<&str> {
        match self {
            QaAnswer::Pending => None,
            QaAnswer::Answered(t) | QaAnswer::Failed(t) => Some(t),
        }
    }
}

/// One question in the session transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    pub question: String,
    pub answer: QaAnswer,
    pub asked_at: DateTime<Utc>,
}

impl QaEntry {
    pub fn pending(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: QaAnswer::Pending,
            asked_at: Utc::now(),
        }
    }
}
