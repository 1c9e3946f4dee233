//! # lens-extract
//!
//! Document ingestion for legal-lens.
//!
//! This crate provides:
//! - Upload validation (declared type, size cap) before any content is read
//! - Plain-text extraction (UTF-8 decode)
//! - Page-by-page PDF text extraction with whitespace normalisation
//! - An adapter registry dispatching on the upload's declared type
//!
//! ## Example
//!
//! ```ignore
//! use lens_core::UploadedFile;
//! use lens_extract::DocumentIngestor;
//!
//! let ingestor = DocumentIngestor::with_default_adapters();
//! let file = UploadedFile::new("policy.txt", "text/plain", b"We collect...".to_vec());
//! let document = ingestor.ingest(file).await?;
//! println!("{} characters extracted", document.char_count());
//! ```

pub mod adapters;
pub mod extraction;
pub mod ingest;

pub use adapters::{PdfTextAdapter, TextNativeAdapter};
pub use extraction::ExtractionRegistry;
pub use ingest::DocumentIngestor;
