//! Session state and its transitions.
//!
//! Every method here is synchronous and side-effect free beyond `self`; the
//! coordinator decides when to call them around the async boundaries.

use serde::{Deserialize, Serialize};

use lens_core::{AnalysisResult, QaAnswer, QaEntry, UploadedDocument};

use crate::interpreter::render_blocks;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing to analyse, or the last action failed.
    #[default]
    Idle,
    /// A file is being extracted.
    Uploading,
    /// Active content is available for analysis.
    Ready,
    /// An analysis call is in flight.
    Analyzing,
    /// The latest analysis succeeded.
    Analyzed,
    /// At least one question is awaiting its answer.
    AskingQuestion,
    /// Every asked question has been resolved.
    AnswerReady,
}

/// All mutable session data.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub document: Option<UploadedDocument>,
    pub pasted_text: String,
    pub analysis: Option<AnalysisResult>,
    pub history: Vec<QaEntry>,
    pub loading: bool,
    pub phase: Phase,
    /// Message for the most recent failed action, cleared by the next success.
    pub last_error: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text that a submit would analyse: the document text when non-empty,
    /// otherwise the pasted text when non-empty.
    pub fn active_content(&self) -> Option<&str> {
        self.document
            .as_ref()
            .map(|doc| doc.extracted_text.as_str())
            .filter(|text| !text.is_empty())
            .or_else(|| Some(self.pasted_text.as_str()).filter(|text| !text.is_empty()))
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    // ─── Upload ────────────────────────────────────────────────────────────

    pub fn upload_started(&mut self) {
        self.phase = Phase::Uploading;
    }

    /// Replace the document wholesale.
    pub fn upload_succeeded(&mut self, document: UploadedDocument) {
        self.document = Some(document);
        self.last_error = None;
        self.phase = Phase::Ready;
    }

    /// Extraction failed: the previous document is cleared, not left stale.
    pub fn upload_failed(&mut self, message: impl Into<String>) {
        self.document = None;
        self.last_error = Some(message.into());
        self.phase = Phase::Idle;
    }

    // ─── Pasted text ───────────────────────────────────────────────────────

    pub fn set_pasted_text(&mut self, text: impl Into<String>) {
        self.pasted_text = text.into();
        match (self.phase, self.active_content().is_some()) {
            (Phase::Idle, true) => self.phase = Phase::Ready,
            (Phase::Ready, false) => self.phase = Phase::Idle,
            _ => {}
        }
    }

    // ─── Analysis ──────────────────────────────────────────────────────────

    pub fn analysis_started(&mut self) {
        self.phase = Phase::Analyzing;
    }

    /// Replace the previous analysis wholesale.
    pub fn analysis_succeeded(&mut self, result: AnalysisResult) {
        self.analysis = Some(result);
        self.last_error = None;
        self.phase = Phase::Analyzed;
    }

    /// The prior analysis, if any, is kept as it was.
    pub fn analysis_failed(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
        self.phase = Phase::Idle;
    }

    // ─── Q&A ───────────────────────────────────────────────────────────────

    /// Append a pending entry and return its index.
    pub fn question_asked(&mut self, question: impl Into<String>) -> usize {
        self.history.push(QaEntry::pending(question));
        self.phase = Phase::AskingQuestion;
        self.history.len() - 1
    }

    /// Resolve the entry at `index`. Entries already resolved are left alone,
    /// so an entry changes at most once.
    pub fn question_resolved(&mut self, index: usize, answer: QaAnswer) -> bool {
        let resolved = match self.history.get_mut(index) {
            Some(entry) if entry.answer.is_pending() => {
                entry.answer = answer;
                true
            }
            _ => false,
        };

        if !self.history.iter().any(|entry| entry.answer.is_pending()) {
            self.phase = Phase::AnswerReady;
        }
        resolved
    }

    pub fn pending_questions(&self) -> usize {
        self.history
            .iter()
            .filter(|entry| entry.answer.is_pending())
            .count()
    }

    /// Read-only view for the presentation layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            loading: self.loading,
            document: self.document.as_ref().map(DocumentMeta::from),
            pasted_text: self.pasted_text.clone(),
            display_text: self
                .analysis
                .as_ref()
                .map(|analysis| render_blocks(&analysis.blocks)),
            analysis: self.analysis.clone(),
            history: self.history.clone(),
            last_error: self.last_error.clone(),
        }
    }
}

/// What the presentation layer shows about the current document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub filename: String,
    pub declared_mime: String,
    pub size_bytes: u64,
    pub char_count: usize,
}

impl From<&UploadedDocument> for DocumentMeta {
    fn from(doc: &UploadedDocument) -> Self {
        Self {
            filename: doc.filename.clone(),
            declared_mime: doc.declared_mime.clone(),
            size_bytes: doc.size_bytes,
            char_count: doc.char_count(),
        }
    }
}

/// Cloned, serialisable view of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub loading: bool,
    pub document: Option<DocumentMeta>,
    pub pasted_text: String,
    pub analysis: Option<AnalysisResult>,
    /// Display text rendered from the analysis blocks.
    pub display_text: Option<String>,
    pub history: Vec<QaEntry>,
    pub last_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::interpret;

    fn document(text: &str) -> UploadedDocument {
        UploadedDocument {
            filename: "policy.txt".to_string(),
            raw_bytes: text.as_bytes().to_vec(),
            declared_mime: "text/plain".to_string(),
            size_bytes: text.len() as u64,
            extracted_text: text.to_string(),
        }
    }

    #[test]
    fn test_active_content_prefers_document() {
        let mut state = SessionState::new();
        assert_eq!(state.active_content(), None);

        state.set_pasted_text("pasted");
        assert_eq!(state.active_content(), Some("pasted"));

        state.upload_succeeded(document("from file"));
        assert_eq!(state.active_content(), Some("from file"));
    }

    #[test]
    fn test_active_content_falls_back_when_document_empty() {
        let mut state = SessionState::new();
        state.upload_succeeded(document(""));
        state.set_pasted_text("pasted");
        assert_eq!(state.active_content(), Some("pasted"));
    }

    #[test]
    fn test_paste_moves_between_idle_and_ready() {
        let mut state = SessionState::new();
        state.set_pasted_text("terms");
        assert_eq!(state.phase, Phase::Ready);
        state.set_pasted_text("");
        assert_eq!(state.phase, Phase::Idle);
    }

    #[test]
    fn test_upload_failure_clears_document() {
        let mut state = SessionState::new();
        state.upload_succeeded(document("old"));
        state.upload_started();
        assert_eq!(state.phase, Phase::Uploading);

        state.upload_failed("No readable text found in PDF");
        assert!(state.document.is_none());
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.last_error.is_some());
    }

    #[test]
    fn test_analysis_failure_keeps_prior_result() {
        let mut state = SessionState::new();
        let first = interpret("Privacy Score: 70/100");
        state.analysis_succeeded(first.clone());

        state.analysis_started();
        state.analysis_failed("Remote error: timeout");

        assert_eq!(state.analysis, Some(first));
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.last_error.as_deref(), Some("Remote error: timeout"));
    }

    #[test]
    fn test_question_entry_resolves_once() {
        let mut state = SessionState::new();
        let index = state.question_asked("Is my data sold?");
        assert_eq!(index, 0);
        assert_eq!(state.phase, Phase::AskingQuestion);
        assert_eq!(state.pending_questions(), 1);

        assert!(state.question_resolved(index, QaAnswer::Answered("No.".to_string())));
        assert!(!state.question_resolved(index, QaAnswer::Failed("late".to_string())));

        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].answer.text(), Some("No."));
        assert_eq!(state.phase, Phase::AnswerReady);
    }

    #[test]
    fn test_phase_waits_for_every_pending_question() {
        let mut state = SessionState::new();
        let first = state.question_asked("one");
        let second = state.question_asked("two");

        state.question_resolved(second, QaAnswer::Answered("2".to_string()));
        assert_eq!(state.phase, Phase::AskingQuestion);

        state.question_resolved(first, QaAnswer::Answered("1".to_string()));
        assert_eq!(state.phase, Phase::AnswerReady);
    }

    #[test]
    fn test_resolve_unknown_index_is_ignored() {
        let mut state = SessionState::new();
        assert!(!state.question_resolved(3, QaAnswer::Answered("x".to_string())));
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_snapshot_serializes_for_presentation() {
        let mut state = SessionState::new();
        state.upload_succeeded(document("We collect data."));
        state.analysis_succeeded(interpret("## Detailed Metrics\n- Privacy Score: 42/100"));

        let snapshot = state.snapshot();
        assert_eq!(
            snapshot.display_text.as_deref(),
            Some("\n## Detailed Metrics\n\n  - Privacy Score: 42/100")
        );

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["phase"], "analyzed");
        assert_eq!(json["document"]["char_count"], 16);
        assert_eq!(json["analysis"]["metrics"]["privacy_score"], 42);
        assert!(json["document"].get("raw_bytes").is_none());
    }
}
