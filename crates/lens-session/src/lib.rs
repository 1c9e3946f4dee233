//! # lens-session
//!
//! Response interpretation and session coordination for legal-lens.
//!
//! This crate provides:
//! - The response interpreter (display blocks, display text, metrics)
//! - The session state and its transitions
//! - The coordinator sequencing upload, paste, analysis and Q&A actions
//! - The `legal-lens` command-line front end
//!
//! ## Example
//!
//! ```ignore
//! use lens_inference::LensConfig;
//! use lens_session::SessionCoordinator;
//!
//! let coordinator = SessionCoordinator::from_config(&LensConfig::load()?)?;
//! coordinator.set_pasted_text("We share your data with partners.");
//! if let Some(result) = coordinator.submit_analysis().await? {
//!     println!("Privacy score: {}", result.metrics.privacy_score);
//! }
//! ```

pub mod interpreter;
pub mod session;

pub use interpreter::{classify_blocks, extract_metrics, format_for_display, interpret, render_blocks};
pub use session::{DocumentMeta, Phase, SessionCoordinator, SessionSnapshot, SessionState};
