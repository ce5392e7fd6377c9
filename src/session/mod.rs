//! Review session: the single owner of all user-visible state.
//!
//! Holds the credential store, the ingested file, the latest result, and
//! the two error slots. Renderers only ever see a [`SessionView`].
//!
//! State sits behind a mutex that is never held across an await, so the
//! session can be shared (`&self`) between an in-flight analysis and
//! further user actions. A second `analyze` while one is pending is
//! refused without touching the network.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::analysis::{self, AnalysisError, CompletionTransport};
use crate::credentials::{CredentialStore, StoreError};
use crate::intake::{self, FileHandle, IntakeError};
use crate::models::{AnalysisResult, IngestedFile};
use crate::output::export::{self, ExportArtifact};

/// What happened when `analyze` was triggered.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeOutcome {
    /// A result was installed.
    Completed(AnalysisResult),
    /// An error was installed in the analysis error slot.
    Failed(AnalysisError),
    /// Another analysis is in flight; nothing was sent.
    AlreadyRunning,
    /// The file changed while the request was in flight; the reply was dropped.
    Superseded,
}

/// Metadata of the current file, without its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    pub language: &'static str,
    pub lines: usize,
}

/// Read-only copy of the session state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub has_credential: bool,
    pub file: Option<FileInfo>,
    pub file_error: Option<IntakeError>,
    pub result: Option<AnalysisResult>,
    pub analysis_error: Option<AnalysisError>,
    pub analyzing: bool,
}

impl SessionView {
    /// Whether the analyse action should be offered.
    pub fn can_analyze(&self) -> bool {
        self.has_credential && self.file.is_some() && !self.analyzing
    }
}

struct SessionState {
    credentials: CredentialStore,
    file: Option<IngestedFile>,
    file_error: Option<IntakeError>,
    result: Option<AnalysisResult>,
    analysis_error: Option<AnalysisError>,
    analyzing: bool,
    /// Bumped whenever the file is replaced or cleared.
    generation: u64,
}

impl SessionState {
    fn install_file(&mut self, file: Option<IngestedFile>) {
        self.file = file;
        self.result = None;
        self.analysis_error = None;
        self.generation += 1;
    }
}

/// A single user's review session.
pub struct ReviewSession {
    state: Mutex<SessionState>,
    transport: Arc<dyn CompletionTransport>,
    model: String,
}

impl ReviewSession {
    /// Create a session around an already-loaded credential store.
    pub fn new(
        credentials: CredentialStore,
        transport: Arc<dyn CompletionTransport>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            state: Mutex::new(SessionState {
                credentials,
                file: None,
                file_error: None,
                result: None,
                analysis_error: None,
                analyzing: false,
                generation: 0,
            }),
            transport,
            model: model.into(),
        }
    }

    /// Load the persisted credential, then create the session.
    ///
    /// A storage failure is logged and the session starts without a key.
    pub fn start(
        mut credentials: CredentialStore,
        transport: Arc<dyn CompletionTransport>,
        model: impl Into<String>,
    ) -> Self {
        if let Err(e) = credentials.load() {
            tracing::warn!(error = %e, "could not load stored API key");
        }
        Self::new(credentials, transport, model)
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ── Credential ──────────────────────────────────────────────────

    pub fn credential(&self) -> Option<String> {
        self.lock().credentials.current().map(str::to_string)
    }

    pub fn set_credential(&self, value: impl Into<String>) -> Result<(), StoreError> {
        self.lock().credentials.set(value)
    }

    pub fn clear_credential(&self) -> Result<(), StoreError> {
        self.lock().credentials.clear()
    }

    // ── File intake ─────────────────────────────────────────────────

    /// Validate and read a file, replacing the current one on success.
    ///
    /// A validation failure only sets the file error. A read failure
    /// discards the current file and result as well.
    pub async fn ingest(&self, file: &dyn FileHandle) -> Result<IngestedFile, IntakeError> {
        self.lock().file_error = None;

        match intake::ingest(file).await {
            Ok(ingested) => {
                let mut state = self.lock();
                state.install_file(Some(ingested.clone()));
                Ok(ingested)
            }
            Err(e) => {
                tracing::info!(file = file.name(), error = %e, "file rejected");
                let mut state = self.lock();
                if !e.is_validation() {
                    state.install_file(None);
                }
                state.file_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Ingest the first of several selected files; the rest are ignored.
    pub async fn ingest_selection<F: FileHandle>(
        &self,
        files: &[F],
    ) -> Option<Result<IngestedFile, IntakeError>> {
        let first = files.first()?;
        if files.len() > 1 {
            tracing::debug!(ignored = files.len() - 1, "only the first selected file is used");
        }
        Some(self.ingest(first).await)
    }

    /// Drop the file, the result, and any analysis error together.
    pub fn clear_file(&self) {
        self.lock().install_file(None);
    }

    // ── Analysis ────────────────────────────────────────────────────

    pub fn is_analyzing(&self) -> bool {
        self.lock().analyzing
    }

    /// Run one analysis of the current file.
    pub async fn analyze(&self) -> AnalyzeOutcome {
        let (credential, file, generation) = {
            let mut state = self.lock();
            if state.analyzing {
                tracing::debug!("analysis already in flight");
                return AnalyzeOutcome::AlreadyRunning;
            }
            state.analysis_error = None;

            let checked = analysis::check_preconditions(
                state.credentials.current(),
                state.file.as_ref(),
            )
            .map(|(c, f)| (c.to_string(), f.clone()));

            match checked {
                Ok((credential, file)) => {
                    state.analyzing = true;
                    (credential, file, state.generation)
                }
                Err(e) => {
                    state.result = None;
                    state.analysis_error = Some(e.clone());
                    return AnalyzeOutcome::Failed(e);
                }
            }
        };

        let _guard = AnalyzingGuard { session: self };

        tracing::info!(file = %file.name, language = file.language, "analysing");
        let outcome =
            analysis::analyze_file(self.transport.as_ref(), &credential, &self.model, &file).await;

        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!("file changed during analysis, dropping reply");
            return AnalyzeOutcome::Superseded;
        }
        match outcome {
            Ok(result) => {
                state.analysis_error = None;
                state.result = Some(result.clone());
                AnalyzeOutcome::Completed(result)
            }
            Err(e) => {
                state.result = None;
                state.analysis_error = Some(e.clone());
                AnalyzeOutcome::Failed(e)
            }
        }
    }

    // ── Views ───────────────────────────────────────────────────────

    pub fn snapshot(&self) -> SessionView {
        let state = self.lock();
        SessionView {
            has_credential: state.credentials.current().is_some(),
            file: state.file.as_ref().map(|f| FileInfo {
                name: f.name.clone(),
                size: f.size,
                language: f.language,
                lines: f.line_count(),
            }),
            file_error: state.file_error.clone(),
            result: state.result.clone(),
            analysis_error: state.analysis_error.clone(),
            analyzing: state.analyzing,
        }
    }

    /// The current result as a downloadable JSON artifact.
    pub fn export(&self) -> Option<ExportArtifact> {
        let state = self.lock();
        let result = state.result.as_ref()?;
        let name = state.file.as_ref().map(|f| f.name.as_str());
        Some(export::build_artifact(result, name))
    }
}

/// Clears the analysing flag on every exit path of `analyze`.
struct AnalyzingGuard<'a> {
    session: &'a ReviewSession,
}

impl Drop for AnalyzingGuard<'_> {
    fn drop(&mut self) {
        self.session.lock().analyzing = false;
    }
}
