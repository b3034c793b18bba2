//! Top-level session coordinator
//!
//! The host-facing facade: start a recording, stop it, ask for the
//! transcript. Owns at most one live session and the single capture
//! process that goes with it.

use std::path::PathBuf;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::capture::Recorder;
use crate::config::{Config, TranscriptionConfig};
use crate::error::SessionError;
use crate::paths::SessionPaths;
use crate::session::{Session, SessionId, SessionState};
use crate::transcribe::{self, Transcription, WaitConfig};

/// Coordinates one recording-to-transcript attempt at a time.
///
/// Start/stop policy: a second `start_recording` while a recording
/// session is live is rejected with `AlreadyRecording`. Starting over a
/// stopped or finished session replaces it; if that session's capture
/// process is somehow still running (it failed mid-recording), the
/// capture is aborted and its partial audio removed before the new one
/// spawns.
pub struct RecordingCoordinator {
    output_dir: PathBuf,
    recorder: Recorder,
    transcription: TranscriptionConfig,
    wait: WaitConfig,
    session: Option<Session>,
    cancel: CancellationToken,
}

impl RecordingCoordinator {
    pub fn new(config: Config) -> Result<Self, SessionError> {
        if config.capture.output_dir.as_os_str().is_empty() {
            return Err(SessionError::Configuration(
                "capture output directory must not be empty".to_string(),
            ));
        }

        Ok(Self {
            output_dir: config.capture.output_dir.clone(),
            recorder: Recorder::new(config.capture),
            transcription: config.transcription,
            wait: config.wait.to_wait_config(),
            session: None,
            cancel: CancellationToken::new(),
        })
    }

    /// Token observed by the result wait loop. Hosts cancel it on
    /// shutdown to abort an in-flight `transcribe` promptly.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The currently tracked session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Generates a fresh session id and spawns the capture process.
    pub async fn start_recording(&mut self) -> Result<SessionId, SessionError> {
        if let Some(session) = &self.session {
            if session.state() == SessionState::Recording {
                return Err(SessionError::AlreadyRecording(session.id().to_string()));
            }
            // A failed early transcribe leaves the previous capture
            // running; a new session must not start behind it.
            if self.recorder.is_recording() {
                self.recorder.abort(session.paths()).await?;
            }
        }

        let id = SessionId::generate();
        let paths = SessionPaths::for_session(id.as_str(), &self.output_dir)?;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| SessionError::RecordingIo {
                stage: "creating output directory",
                source,
            })?;

        self.recorder.start(&id, &paths)?;

        if let Some(previous) = self.session.replace(Session::begin(id.clone(), paths)) {
            info!(
                "Discarded previous session {} in state {:?}",
                previous.id(),
                previous.state()
            );
        }

        Ok(id)
    }

    /// Kills the capture process and renames the temp audio to its final
    /// name, signalling the transcription engine to pick it up.
    ///
    /// If the session already ended (an early `transcribe` timed out
    /// while the capture was still running), the capture is killed and
    /// its partial audio discarded instead of renamed: no process and no
    /// file outlives this call either way.
    pub async fn stop_recording(&mut self) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveRecording)?;

        if session.state() == SessionState::Recording {
            return match self.recorder.stop(session.paths()).await {
                Ok(()) => {
                    session.mark_stopped();
                    Ok(())
                }
                Err(e) => {
                    session.mark_failed();
                    Err(e)
                }
            };
        }

        if self.recorder.is_recording() {
            return self.recorder.abort(session.paths()).await;
        }

        Err(SessionError::NoActiveRecording)
    }

    /// Waits for the engine's result file, parses it, and cleans up both
    /// artifacts. Blocks for up to the configured wait timeout.
    ///
    /// Calling this before `stop_recording` completes is permitted but
    /// futile: the final audio file does not exist yet, so the engine
    /// never starts and the wait times out.
    pub async fn transcribe(&mut self) -> Result<Transcription, SessionError> {
        let session = match self.session.as_mut() {
            Some(s) if !s.state().is_terminal() => s,
            _ => return Err(SessionError::NoActiveRecording),
        };

        session.mark_transcribing();
        info!(
            "Transcribing session {} using '{}' model and '{}' language",
            session.id(),
            self.transcription.model,
            self.transcription.language
        );

        let outcome = transcribe::run(session.paths(), &self.wait, &self.cancel).await;
        match &outcome {
            Ok(transcription) => {
                session.mark_done();
                info!(
                    "Transcription completed (session {}): {} segment(s)",
                    session.id(),
                    transcription.segments.len()
                );
            }
            Err(e) => {
                session.mark_failed();
                warn!("Transcription failed (session {}): {}", session.id(), e);
            }
        }

        outcome
    }
}
