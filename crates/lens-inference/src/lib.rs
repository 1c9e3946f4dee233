//! # lens-inference
//!
//! Chat-completion prompt clients for legal-lens.
//!
//! This crate provides:
//! - An OpenAI-compatible chat backend (`/chat/completions`)
//! - The analysis client (fixed structured prompt, 350-token ceiling)
//! - The assistant client (generic persona, 512-token ceiling)
//! - Configuration loading from TOML or environment variables
//! - A deterministic mock backend (feature `mock`)
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lens_inference::{config::LensConfig, AnalysisClient, OpenAIBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = LensConfig::from_env();
//!     let backend = OpenAIBackend::new(config.openai_config()).unwrap();
//!     let client = AnalysisClient::new(Arc::new(backend));
//!     let reply = client.analyze("We collect your email address.").await.unwrap();
//!     println!("{}", reply);
//! }
//! ```

pub mod clients;
pub mod config;
pub mod openai;
pub mod prompts;

// Mock chat backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use clients::{AnalysisClient, AssistantClient};
pub use config::{ConfigError, LensConfig};
pub use openai::{OpenAIBackend, OpenAIConfig};
pub use prompts::{ANALYSIS_SYSTEM_PROMPT, ASSISTANT_SYSTEM_PROMPT};
