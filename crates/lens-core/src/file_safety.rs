//! Upload validation.
//!
//! Runs on the declared metadata only: nothing here reads the file content, so
//! a rejected upload never reaches an extraction adapter.

use crate::defaults::{MAX_UPLOAD_BYTES, MIME_PDF, MIME_TEXT};
use crate::error::ValidationError;

/// MIME types accepted by the ingestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportedMime {
    Pdf,
    PlainText,
}

impl SupportedMime {
    pub fn from_declared(mime: &str) -> Option<Self> {
        match mime {
            MIME_PDF => Some(Self::Pdf),
            MIME_TEXT => Some(Self::PlainText),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => MIME_PDF,
            Self::PlainText => MIME_TEXT,
        }
    }

    /// Guess the declared type from a file name, the way a file picker would.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" | "text" => Some(Self::PlainText),
            _ => None,
        }
    }
}

/// Validate an upload's declared type and size.
///
/// Type is checked first, then size against [`MAX_UPLOAD_BYTES`].
pub fn validate_upload(declared_mime: &str, size_bytes: u64) -> Result<SupportedMime, ValidationError> {
    let mime = SupportedMime::from_declared(declared_mime)
        .ok_or_else(|| ValidationError::UnsupportedType(declared_mime.to_string()))?;

    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge {
            size: size_bytes,
            max: MAX_UPLOAD_BYTES,
        });
    }

    Ok(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_pdf_and_text() {
        assert_eq!(validate_upload("application/pdf", 10), Ok(SupportedMime::Pdf));
        assert_eq!(validate_upload("text/plain", 10), Ok(SupportedMime::PlainText));
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let err = validate_upload("image/png", 10).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedType("image/png".to_string()));
    }

    #[test]
    fn test_type_checked_before_size() {
        let err = validate_upload("application/zip", MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType(_)));
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(validate_upload("text/plain", MAX_UPLOAD_BYTES).is_ok());
        let err = validate_upload("text/plain", MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLarge {
                size: MAX_UPLOAD_BYTES + 1,
                max: MAX_UPLOAD_BYTES,
            }
        );
    }

    #[test]
    fn test_mime_from_filename() {
        assert_eq!(SupportedMime::from_filename("terms.PDF"), Some(SupportedMime::Pdf));
        assert_eq!(
            SupportedMime::from_filename("privacy.txt"),
            Some(SupportedMime::PlainText)
        );
        assert_eq!(SupportedMime::from_filename("notes.docx"), None);
        assert_eq!(SupportedMime::from_filename("README"), None);
    }

    #[test]
    fn test_mime_as_str_round_trip() {
        for mime in [SupportedMime::Pdf, SupportedMime::PlainText] {
            assert_eq!(SupportedMime::from_declared(mime.as_str()), Some(mime));
        }
    }
}
