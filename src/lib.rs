pub mod capture;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod paths;
pub mod session;
pub mod transcribe;

pub use capture::Recorder;
pub use config::{CaptureConfig, Config, TranscriptionConfig, WhisperModel};
pub use coordinator::RecordingCoordinator;
pub use error::SessionError;
pub use paths::SessionPaths;
pub use session::{Session, SessionId, SessionState};
pub use transcribe::{Segment, Transcription, WaitConfig};
