//! # lens-core
//!
//! Core types, traits, and abstractions for the legal-lens document analyser.
//!
//! This crate provides the data model shared by the ingestion, inference and
//! session crates, the error taxonomy every action reports through, and the
//! trait seams (chat backend, extraction adapter) the other crates plug into.

pub mod defaults;
pub mod error;
pub mod file_safety;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, ExtractionError, Result, ValidationError};
pub use file_safety::{validate_upload, SupportedMime};
pub use models::*;
pub use traits::*;
