//! Session coordinator: sequences user actions against the ingestor and the
//! prompt clients and applies the resulting state transitions.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tracing::{debug, field, info, instrument, warn, Span};

use lens_core::{
    defaults, logging, validate_upload, AnalysisResult, GenerationBackend, QaAnswer, QaEntry, Result,
    UploadedFile,
};
use lens_extract::DocumentIngestor;
use lens_inference::{AnalysisClient, AssistantClient, LensConfig, OpenAIBackend};

use super::state::{SessionSnapshot, SessionState};
use crate::interpreter::interpret;

/// Holds the shared loading flag up for the duration of one remote call.
///
/// The flag is cleared on drop whatever the call's outcome. With overlapping
/// calls the first one to finish clears it (last writer wins).
struct LoadingGuard<'a> {
    state: &'a Mutex<SessionState>,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(state: &'a Mutex<SessionState>) -> Self {
        lock_state(state).set_loading(true);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock_state(self.state).set_loading(false);
    }
}

/// A panic while holding the lock must not wedge the session.
fn lock_state(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the session state and exposes the four user actions.
///
/// Actions take `&self`, so several can be in flight at once. The state lock
/// is never held across an `.await`.
pub struct SessionCoordinator {
    state: Mutex<SessionState>,
    ingestor: DocumentIngestor,
    analysis: AnalysisClient,
    assistant: AssistantClient,
}

impl SessionCoordinator {
    pub fn new(ingestor: DocumentIngestor, analysis: AnalysisClient, assistant: AssistantClient) -> Self {
        Self {
            state: Mutex::new(SessionState::new()),
            ingestor,
            analysis,
            assistant,
        }
    }

    /// Coordinator with default adapters and token ceilings over one backend.
    pub fn with_backend(backend: Arc<dyn GenerationBackend>) -> Self {
        Self::new(
            DocumentIngestor::with_default_adapters(),
            AnalysisClient::new(backend.clone()),
            AssistantClient::new(backend),
        )
    }

    /// Coordinator talking to the endpoint described by `config`.
    pub fn from_config(config: &LensConfig) -> Result<Self> {
        config.validate()?;
        let backend: Arc<dyn GenerationBackend> = Arc::new(OpenAIBackend::new(config.openai_config())?);

        Ok(Self::new(
            DocumentIngestor::with_default_adapters(),
            AnalysisClient::new(backend.clone()).with_max_tokens(config.analysis_max_tokens),
            AssistantClient::new(backend).with_max_tokens(config.assistant_max_tokens),
        ))
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        lock_state(&self.state)
    }

    /// Cloned read-only view of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state().snapshot()
    }

    /// Ingest a picked file.
    ///
    /// A file rejected on type or size leaves the state untouched. A file that
    /// passes validation but yields no text clears the current document.
    #[instrument(
        skip(self, file),
        fields(subsystem = "session", component = "coordinator", op = "upload_file", filename = %file.filename)
    )]
    pub async fn upload_file(&self, file: UploadedFile) -> Result<()> {
        if let Err(e) = validate_upload(&file.declared_mime, file.size_bytes()) {
            warn!(error = %e, "Upload rejected");
            return Err(e.into());
        }

        self.state().upload_started();

        match self.ingestor.ingest(file).await {
            Ok(document) => {
                info!(char_count = document.char_count(), "Document ready");
                self.state().upload_succeeded(document);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Document extraction failed");
                self.state().upload_failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Replace the pasted text.
    pub fn set_pasted_text(&self, text: impl Into<String>) {
        let text = text.into();
        debug!(subsystem = "session", text_len = text.len(), "Pasted text updated");
        self.state().set_pasted_text(text);
    }

    /// Analyse the active content.
    ///
    /// Returns `Ok(None)` without calling out when there is no active content.
    /// On failure the previous analysis stays in place.
    #[instrument(
        skip(self),
        fields(
            subsystem = "session",
            component = "coordinator",
            op = "submit_analysis",
            block_count = field::Empty,
        )
    )]
    pub async fn submit_analysis(&self) -> Result<Option<AnalysisResult>> {
        let content = {
            let mut state = self.state();
            match state.active_content() {
                Some(content) => {
                    let content = content.to_string();
                    state.analysis_started();
                    content
                }
                None => {
                    debug!("No active content, nothing to analyse");
                    return Ok(None);
                }
            }
        };

        let start = Instant::now();
        let _loading = LoadingGuard::acquire(&self.state);

        match self.analysis.analyze(&content).await {
            Ok(raw) => {
                let result = interpret(&raw);
                Span::current().record(logging::BLOCK_COUNT, result.blocks.len());
                info!(
                    duration_ms = start.elapsed().as_millis() as u64,
                    privacy_score = result.metrics.privacy_score,
                    "Analysis complete"
                );
                self.state().analysis_succeeded(result.clone());
                Ok(Some(result))
            }
            Err(e) => {
                warn!(error = %e, "Analysis failed, keeping previous result");
                self.state().analysis_failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Ask a free-form question.
    ///
    /// A pending entry is appended before the call goes out and is then filled
    /// in place with the answer or the fixed error marker. Returns the
    /// resolved entry, or `None` for an empty question.
    #[instrument(
        skip(self, question),
        fields(
            subsystem = "session",
            component = "coordinator",
            op = "submit_question",
            entry_index = field::Empty,
        )
    )]
    pub async fn submit_question(&self, question: &str) -> Option<QaEntry> {
        if question.is_empty() {
            debug!("Empty question ignored");
            return None;
        }

        let entry_index = self.state().question_asked(question);
        Span::current().record(logging::ENTRY_INDEX, entry_index);
        let start = Instant::now();
        let _loading = LoadingGuard::acquire(&self.state);

        let answer = match self.assistant.ask(question).await {
            Ok(reply) => QaAnswer::Answered(reply),
            Err(e) => {
                warn!(error = %e, "Question failed");
                QaAnswer::Failed(defaults::QA_ERROR_MESSAGE.to_string())
            }
        };

        let mut state = self.state();
        state.question_resolved(entry_index, answer);
        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            pending = state.pending_questions(),
            "Question resolved"
        );
        state.history.get(entry_index).cloned()
    }
}
