//! Extraction adapter implementations.

pub mod pdf_text;
pub mod text_native;

pub use pdf_text::PdfTextAdapter;
pub use text_native::TextNativeAdapter;
