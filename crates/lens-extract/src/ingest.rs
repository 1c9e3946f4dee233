//! Document ingestion: validation followed by strategy dispatch.

use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use lens_core::{validate_upload, ExtractionStrategy, Result, UploadedDocument, UploadedFile};

use crate::extraction::ExtractionRegistry;

/// Turns a picked file into an [`UploadedDocument`].
///
/// Validation runs on the declared MIME type and size only; a rejected file is
/// never handed to an adapter.
pub struct DocumentIngestor {
    registry: ExtractionRegistry,
}

impl DocumentIngestor {
    pub fn new(registry: ExtractionRegistry) -> Self {
        Self { registry }
    }

    pub fn with_default_adapters() -> Self {
        Self::new(ExtractionRegistry::with_default_adapters())
    }

    pub fn registry(&self) -> &ExtractionRegistry {
        &self.registry
    }

    #[instrument(
        skip(self, file),
        fields(
            subsystem = "extract",
            component = "ingestor",
            op = "ingest",
            filename = %file.filename,
            mime_type = %file.declared_mime,
            size_bytes = file.size_bytes(),
        )
    )]
    pub async fn ingest(&self, file: UploadedFile) -> Result<UploadedDocument> {
        let start = Instant::now();
        let size_bytes = file.size_bytes();

        let mime = validate_upload(&file.declared_mime, size_bytes).map_err(|e| {
            warn!(error = %e, "Upload rejected");
            e
        })?;

        let strategy = ExtractionStrategy::from(mime);
        debug!(?strategy, "Dispatching extraction");

        let extraction = self
            .registry
            .extract(strategy, &file.data, &file.filename)
            .await?;

        let document = UploadedDocument {
            filename: file.filename,
            raw_bytes: file.data,
            declared_mime: mime.as_str().to_string(),
            size_bytes,
            extracted_text: extraction.extracted_text,
        };

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            char_count = document.char_count(),
            "Document ingested"
        );

        Ok(document)
    }
}

impl Default for DocumentIngestor {
    fn default() -> Self {
        Self::with_default_adapters()
    }
}
