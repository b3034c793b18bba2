use std::path::{Path, PathBuf};

use crate::error::SessionError;

// Filename suffixes shared with the external transcription engine. The
// engine watches the output directory for `*_recording.wav` and writes
// its result next to it as `*_recording.json`, so these strings are a
// wire format and must not change.
const TEMP_AUDIO_SUFFIX: &str = "recording_temp.wav";
const FINAL_AUDIO_SUFFIX: &str = "recording.wav";
const RESULT_SUFFIX: &str = "recording.json";

/// The three correlated file paths for one session.
///
/// Derived purely from the session id and the output directory: the same
/// inputs always produce the same paths, and distinct session ids never
/// collide because the id is the filename prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    /// Where the capture process writes while recording is in progress.
    pub temp_audio: PathBuf,

    /// The renamed audio file that signals the engine to start transcribing.
    pub final_audio: PathBuf,

    /// Where the engine is expected to write its JSON result.
    pub result: PathBuf,
}

impl SessionPaths {
    /// Derives the path set for a session inside `base_dir`.
    pub fn for_session(session_id: &str, base_dir: &Path) -> Result<Self, SessionError> {
        if session_id.is_empty() {
            return Err(SessionError::Configuration(
                "session id must not be empty".to_string(),
            ));
        }
        if base_dir.as_os_str().is_empty() {
            return Err(SessionError::Configuration(
                "output directory must not be empty".to_string(),
            ));
        }

        Ok(Self {
            temp_audio: base_dir.join(format!("{session_id}_{TEMP_AUDIO_SUFFIX}")),
            final_audio: base_dir.join(format!("{session_id}_{FINAL_AUDIO_SUFFIX}")),
            result: base_dir.join(format!("{session_id}_{RESULT_SUFFIX}")),
        })
    }
}
