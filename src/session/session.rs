use chrono::{DateTime, Utc};

use super::SessionId;
use crate::paths::SessionPaths;

/// Lifecycle state of a session.
///
/// `Recording → Stopped → Transcribing → Done | Failed`. One shortcut
/// exists: a host may request the transcript before stopping, entering
/// `Transcribing` straight from `Recording`; the wait then times out,
/// since only the stop rename creates the audio file the engine reacts
/// to. There is no `Idle` variant: idle is the coordinator holding no
/// session at all. `Done` and `Failed` are terminal; retrying means
/// starting a new session, never rewinding this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The capture process is running and writing the temp audio file.
    Recording,

    /// Capture finished; the final audio file is waiting for the engine.
    Stopped,

    /// The pipeline is waiting for, parsing, or cleaning up the result.
    Transcribing,

    /// A transcription was returned to the caller.
    Done,

    /// The attempt ended in an error; artifacts have been cleaned up
    /// best-effort.
    Failed,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Done | SessionState::Failed)
    }
}

/// One recording-to-transcript attempt.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    state: SessionState,
    paths: SessionPaths,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session in the `Recording` state.
    pub(crate) fn begin(id: SessionId, paths: SessionPaths) -> Self {
        Self {
            id,
            state: SessionState::Recording,
            paths,
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn paths(&self) -> &SessionPaths {
        &self.paths
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub(crate) fn mark_stopped(&mut self) {
        self.state = SessionState::Stopped;
    }

    pub(crate) fn mark_transcribing(&mut self) {
        self.state = SessionState::Transcribing;
    }

    pub(crate) fn mark_done(&mut self) {
        self.state = SessionState::Done;
    }

    pub(crate) fn mark_failed(&mut self) {
        self.state = SessionState::Failed;
    }
}
