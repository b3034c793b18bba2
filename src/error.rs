use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the recording and transcription lifecycle.
///
/// Every variant names the stage that failed so a host can tell apart
/// problems in this process (lifecycle misuse, local I/O) from problems
/// in the external capture tool or transcription engine.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Bad session id, output directory, or config file contents.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// `start_recording` was called while a capture process is active.
    #[error("recording already in progress (session {0})")]
    AlreadyRecording(String),

    /// `stop_recording` or `transcribe` was called with no session to act on.
    #[error("no active recording")]
    NoActiveRecording,

    /// Spawning or killing the capture process, or moving its output, failed.
    #[error("recording I/O failure while {stage}: {source}")]
    RecordingIo {
        stage: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The transcription engine never produced a result file.
    #[error("timed out after {timeout:?} waiting for result file {}", .path.display())]
    Timeout { path: PathBuf, timeout: Duration },

    /// The result file existed but did not match the expected schema.
    #[error("malformed result file {}: {reason}", .path.display())]
    MalformedResult { path: PathBuf, reason: String },

    /// The host cancelled the session while waiting for a result.
    #[error("cancelled while waiting for result file {}", .path.display())]
    Cancelled { path: PathBuf },
}
