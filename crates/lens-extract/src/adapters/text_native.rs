//! TextNative extraction adapter - handles plain text uploads.

use async_trait::async_trait;

use lens_core::{ExtractionAdapter, ExtractionResult, ExtractionStrategy, Result};

/// Adapter for extracting content from plain text files.
///
/// Reads bytes as UTF-8 (with lossy conversion for invalid sequences) and
/// returns the text verbatim. No trimming, no line-ending normalisation.
pub struct TextNativeAdapter;

#[async_trait]
impl ExtractionAdapter for TextNativeAdapter {
    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::TextNative
    }

    async fn extract(&self, data: &[u8], _filename: &str) -> Result<ExtractionResult> {
        let text = String::from_utf8_lossy(data).into_owned();
        let char_count = text.chars().count();
        let line_count = text.lines().count();

        Ok(ExtractionResult {
            extracted_text: text,
            metadata: serde_json::json!({
                "char_count": char_count,
                "line_count": line_count,
            }),
        })
    }

    fn name(&self) -> &str {
        "text_native"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_text_native_extraction_is_verbatim() {
        let adapter = TextNativeAdapter;
        let input = "  We collect your email.\r\n\nWe never sell it.  \n";
        let result = adapter.extract(input.as_bytes(), "policy.txt").await.unwrap();

        assert_eq!(result.extracted_text, input);
        assert_eq!(result.metadata["line_count"], 3);
    }

    #[tokio::test]
    async fn test_text_native_empty_input() {
        let adapter = TextNativeAdapter;
        let result = adapter.extract(b"", "empty.txt").await.unwrap();

        assert_eq!(result.extracted_text, "");
        assert_eq!(result.metadata["char_count"], 0);
        assert_eq!(result.metadata["line_count"], 0);
    }

    #[tokio::test]
    async fn test_text_native_counts_chars_not_bytes() {
        let adapter = TextNativeAdapter;
        let result = adapter.extract("données".as_bytes(), "fr.txt").await.unwrap();
        assert_eq!(result.metadata["char_count"], 7);
    }

    #[tokio::test]
    async fn test_text_native_invalid_utf8() {
        let adapter = TextNativeAdapter;
        let data: &[u8] = &[0xFF, 0xFE, b'h', b'i'];
        let result = adapter.extract(data, "binary.txt").await.unwrap();

        // Should use lossy conversion (replacement characters)
        assert!(result.extracted_text.contains("hi"));
        assert!(result.extracted_text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_text_native_strategy_and_name() {
        let adapter = TextNativeAdapter;
        assert_eq!(adapter.strategy(), ExtractionStrategy::TextNative);
        assert_eq!(adapter.name(), "text_native");
    }
}
