//! OpenAI-compatible chat completion backend.
//!
//! Works with any endpoint that speaks the `/chat/completions` protocol,
//! including:
//!
//! - Hugging Face inference router (default)
//! - OpenAI cloud API
//! - Ollama (in OpenAI compatibility mode)
//! - vLLM
//!
//! # Example
//!
//! ```rust,no_run
//! use lens_inference::openai::{OpenAIBackend, OpenAIConfig};
//! use lens_core::GenerationBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = OpenAIConfig {
//!         base_url: "http://localhost:11434/v1".to_string(), // Ollama
//!         api_key: None,
//!         model: "mistral".to_string(),
//!         timeout_seconds: 120,
//!     };
//!     let backend = OpenAIBackend::new(config).unwrap();
//!
//!     let reply = backend
//!         .generate_with_system("You are terse.", "Hello", 64)
//!         .await
//!         .unwrap();
//!     println!("{}", reply.content);
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{OpenAIBackend, OpenAIConfig};
pub use error::{to_lens_error, OpenAIErrorCode};
pub use types::*;
