//! PdfText extraction adapter - extracts text from PDFs page by page using `lopdf`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use lopdf::{Document, Object, ObjectId};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace, warn};

use lens_core::{
    Error, ExtractionAdapter, ExtractionError, ExtractionResult, ExtractionStrategy, Result,
};

/// Any run of whitespace inside a page (including line breaks the content
/// stream produced between text objects).
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Kerning adjustment inside a `TJ` array (thousandths of text space) wide
/// enough to count as a word gap.
const TJ_WORD_GAP: f32 = -100.0;

/// Adapter for extracting text from PDF files.
///
/// Pages are visited in page-number order. Each page's text items (the
/// strings shown by `Tj`, `'`, `"` and `TJ`) are joined with single spaces,
/// every whitespace run is collapsed to a single space and the page is
/// followed by a newline. A document whose concatenated text is blank after
/// trimming is reported as [`ExtractionError::EmptyResult`]; anything `lopdf`
/// cannot parse is [`ExtractionError::Corrupt`].
pub struct PdfTextAdapter;

/// Text of one page: items joined by spaces, whitespace runs collapsed,
/// newline-terminated.
fn normalize_page(items: &[String]) -> String {
    let mut page = WHITESPACE_RUN.replace_all(&items.join(" "), " ").into_owned();
    page.push('\n');
    page
}

/// Split a `TJ` array into text items.
///
/// Strings separated only by a kerning adjustment belong to the same item, so
/// kerned words stay whole; a large negative adjustment becomes a space.
/// Strings that follow each other directly are separate items.
fn collect_tj_items(items: &mut Vec<String>, encoding: Option<&str>, elements: &[Object]) {
    let mut current: Option<String> = None;
    let mut kerned = false;

    for element in elements {
        match element {
            Object::String(bytes, _) => {
                let text = Document::decode_text(encoding, bytes);
                match current.as_mut() {
                    Some(item) if kerned => item.push_str(&text),
                    _ => items.extend(current.replace(text)),
                }
                kerned = false;
            }
            other => {
                if let (Ok(adjustment), Some(item)) = (other.as_float(), current.as_mut()) {
                    if adjustment < TJ_WORD_GAP {
                        item.push(' ');
                    }
                    kerned = true;
                }
            }
        }
    }
    items.extend(current);
}

/// Text items shown on one page, in content-stream order.
fn page_items(doc: &Document, page_id: ObjectId) -> lopdf::Result<Vec<String>> {
    let encodings: BTreeMap<Vec<u8>, &str> = doc
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect();
    let content = doc.get_and_decode_page_content(page_id)?;

    let mut items = Vec::new();
    let mut encoding = None;
    for operation in &content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                encoding = match operation.operands.first() {
                    Some(font) => encodings.get(font.as_name()?).copied(),
                    None => None,
                };
            }
            "Tj" | "'" | "\"" => {
                for operand in &operation.operands {
                    if let Object::String(bytes, _) = operand {
                        items.push(Document::decode_text(encoding, bytes));
                    }
                }
            }
            "TJ" => {
                for operand in &operation.operands {
                    if let Object::Array(elements) = operand {
                        collect_tj_items(&mut items, encoding, elements);
                    }
                }
            }
            _ => {}
        }
    }
    Ok(items)
}

/// Parse `data` and return the concatenated page text plus the page count.
fn extract_pages(data: &[u8]) -> std::result::Result<(String, usize), ExtractionError> {
    // Validate PDF magic bytes (%PDF)
    if data.len() < 4 || &data[0..4] != b"%PDF" {
        return Err(ExtractionError::Corrupt(
            "missing %PDF header".to_string(),
        ));
    }

    let doc = Document::load_mem(data).map_err(|e| ExtractionError::Corrupt(e.to_string()))?;

    // BTreeMap keys are page numbers, so iteration is already in page order.
    let pages = doc.get_pages();
    let mut content = String::new();
    for (&page_number, &page_id) in &pages {
        let items = page_items(&doc, page_id)
            .map_err(|e| ExtractionError::Corrupt(format!("page {}: {}", page_number, e)))?;
        trace!(page_number, item_count = items.len(), "Extracted page text");
        content.push_str(&normalize_page(&items));
    }

    Ok((content, pages.len()))
}

#[async_trait]
impl ExtractionAdapter for PdfTextAdapter {
    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::PdfText
    }

    async fn extract(&self, data: &[u8], filename: &str) -> Result<ExtractionResult> {
        if data.is_empty() {
            return Err(ExtractionError::Corrupt("empty PDF data".to_string()).into());
        }

        let owned = data.to_vec();
        let (text, page_count) = tokio::task::spawn_blocking(move || extract_pages(&owned))
            .await
            .map_err(|e| Error::Internal(format!("PDF extraction task failed: {}", e)))?
            .map_err(|e| {
                warn!(filename, error = %e, "PDF extraction failed");
                Error::Extraction(e)
            })?;

        if text.trim().is_empty() {
            warn!(filename, page_count, "PDF has no extractable text");
            return Err(ExtractionError::EmptyResult.into());
        }

        debug!(
            filename,
            page_count,
            char_count = text.len(),
            "PDF text extracted"
        );

        Ok(ExtractionResult {
            metadata: serde_json::json!({
                "page_count": page_count,
                "char_count": text.chars().count(),
            }),
            extracted_text: text,
        })
    }

    fn name(&self) -> &str {
        "pdf_text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Dictionary, StringFormat, Stream};

    /// Build an in-memory PDF with one page per content stream.
    fn build_pdf(page_contents: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.new_object_id();
        let mut font = Dictionary::new();
        font.set("Type", Object::Name(b"Font".to_vec()));
        font.set("Subtype", Object::Name(b"Type1".to_vec()));
        font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
        doc.objects.insert(font_id, Object::Dictionary(font));

        let mut font_map = Dictionary::new();
        font_map.set("F1", Object::Reference(font_id));
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(font_map));

        let mut kids = Vec::new();
        for content in page_contents {
            let content_id = doc.new_object_id();
            doc.objects.insert(
                content_id,
                Object::Stream(Stream::new(Dictionary::new(), content.as_bytes().to_vec())),
            );

            let page_id = doc.new_object_id();
            let mut page = Dictionary::new();
            page.set("Type", Object::Name(b"Page".to_vec()));
            page.set("Parent", Object::Reference(pages_id));
            page.set("Contents", Object::Reference(content_id));
            page.set("Resources", Object::Dictionary(resources.clone()));
            page.set(
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            );
            doc.objects.insert(page_id, Object::Dictionary(page));
            kids.push(Object::Reference(page_id));
        }

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Count", Object::Integer(kids.len() as i64));
        pages.set("Kids", Object::Array(kids));
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.new_object_id();
        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        doc.objects.insert(catalog_id, Object::Dictionary(catalog));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    fn items(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    fn literal(text: &str) -> Object {
        Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
    }

    #[test]
    fn test_normalize_page_collapses_whitespace() {
        assert_eq!(normalize_page(&items(&["We  collect\n\tdata"])), "We collect data\n");
        assert_eq!(normalize_page(&[]), "\n");
        // Leading/trailing runs collapse to one space, they are not trimmed.
        assert_eq!(normalize_page(&items(&["\n\nTerms \n"])), " Terms \n");
    }

    #[test]
    fn test_normalize_page_joins_items_with_spaces() {
        assert_eq!(
            normalize_page(&items(&["We collect", "your email", ""])),
            "We collect your email \n"
        );
    }

    #[test]
    fn test_tj_items_keep_kerned_words_whole() {
        let mut collected = Vec::new();
        collect_tj_items(
            &mut collected,
            None,
            &[
                literal("Pri"),
                Object::Integer(-20),
                literal("vacy"),
                Object::Real(-250.0),
                literal("Policy"),
                literal("Terms"),
            ],
        );
        assert_eq!(collected, items(&["Privacy Policy", "Terms"]));
    }

    #[test]
    fn test_tj_leading_adjustment_is_ignored() {
        let mut collected = Vec::new();
        collect_tj_items(&mut collected, None, &[Object::Integer(-500), literal("Data")]);
        assert_eq!(collected, items(&["Data"]));
    }

    #[tokio::test]
    async fn test_pdf_text_extracts_pages_in_order() {
        let pdf = build_pdf(&[
            "BT /F1 12 Tf 50 700 Td (Privacy Policy) Tj ET",
            "BT /F1 12 Tf 50 700 Td (Second Page) Tj ET",
        ]);

        let result = PdfTextAdapter.extract(&pdf, "policy.pdf").await.unwrap();
        let text = result.extracted_text;

        let first = text.find("Privacy Policy").expect("first page text");
        let second = text.find("Second Page").expect("second page text");
        assert!(first < second);
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with('\n'));
        assert_eq!(result.metadata["page_count"], 2);
    }

    #[tokio::test]
    async fn test_pdf_text_separates_items_within_one_text_object() {
        let pdf = build_pdf(&[
            "BT /F1 12 Tf 50 700 Td (We collect) Tj 0 -14 Td (your email) Tj ET",
            "BT /F1 12 Tf 50 700 Td (We collect) Tj (your email) Tj ET",
            "BT /F1 12 Tf 50 700 Td [(We collect) (your email)] TJ ET",
        ]);

        let result = PdfTextAdapter.extract(&pdf, "policy.pdf").await.unwrap();
        assert_eq!(
            result.extracted_text,
            "We collect your email\nWe collect your email\nWe collect your email\n"
        );
    }

    #[tokio::test]
    async fn test_pdf_text_image_only_is_empty_result() {
        let pdf = build_pdf(&["q 100 0 0 100 50 600 cm Q", "q Q"]);

        let err = PdfTextAdapter.extract(&pdf, "scan.pdf").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Extraction(ExtractionError::EmptyResult)
        ));
    }

    #[tokio::test]
    async fn test_pdf_text_empty_input() {
        let err = PdfTextAdapter.extract(b"", "empty.pdf").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Extraction(ExtractionError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn test_pdf_text_missing_header_is_corrupt() {
        let err = PdfTextAdapter
            .extract(b"not a pdf at all", "bad.pdf")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing %PDF header"));
    }

    #[tokio::test]
    async fn test_pdf_text_truncated_document_is_corrupt() {
        let err = PdfTextAdapter
            .extract(b"%PDF-1.4\n1 0 obj << /Type /Catalog", "broken.pdf")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Extraction(ExtractionError::Corrupt(_))
        ));
    }

    #[test]
    fn test_pdf_text_strategy_and_name() {
        assert_eq!(PdfTextAdapter.strategy(), ExtractionStrategy::PdfText);
        assert_eq!(PdfTextAdapter.name(), "pdf_text");
    }
}
