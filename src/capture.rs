//! External capture process supervision
//!
//! Spawns and kills the audio capture tool (sox by default). The recorder
//! owns at most one child process; a second `start` is rejected rather
//! than silently replacing the tracked handle, which would leak a running
//! recorder writing to a colliding filename.

use std::process::Stdio;
#[cfg(unix)]
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::config::CaptureConfig;
use crate::error::SessionError;
use crate::paths::SessionPaths;
use crate::session::SessionId;
use crate::transcribe::remove_artifacts;

/// How long a terminated capture process gets to exit on its own before
/// the hard kill.
#[cfg(unix)]
const TERMINATE_GRACE: Duration = Duration::from_secs(2);

/// Supervises the external capture process for the active session.
pub struct Recorder {
    config: CaptureConfig,
    active: Option<CaptureProcess>,
}

struct CaptureProcess {
    session_id: SessionId,
    child: Child,
}

impl Recorder {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Spawns the capture process targeting the session's temp audio path.
    ///
    /// Fails with `AlreadyRecording` if a capture process is still tracked.
    pub fn start(
        &mut self,
        session_id: &SessionId,
        paths: &SessionPaths,
    ) -> Result<(), SessionError> {
        if let Some(active) = &self.active {
            return Err(SessionError::AlreadyRecording(
                active.session_id.to_string(),
            ));
        }

        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(&paths.temp_audio)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Coordinator teardown must never leave a recorder running.
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SessionError::RecordingIo {
                stage: "spawning capture process",
                source,
            })?;

        // Route tool output to the log sink. Capture tools chatter on
        // stderr while recording; that is not a failure signal.
        if let Some(stdout) = child.stdout.take() {
            forward_output(stdout, "stdout", session_id.clone());
        }
        if let Some(stderr) = child.stderr.take() {
            forward_output(stderr, "stderr", session_id.clone());
        }

        info!(
            "Capture started (session {}): {} -> {}",
            session_id,
            self.config.program,
            paths.temp_audio.display()
        );

        self.active = Some(CaptureProcess {
            session_id: session_id.clone(),
            child,
        });

        Ok(())
    }

    /// Kills the active capture process, then renames the temp audio file
    /// to its final name to signal the transcription engine.
    ///
    /// The tracked handle is cleared before the rename: even if the rename
    /// fails (e.g. the tool never created the file), no process is left
    /// running or tracked after this returns.
    pub async fn stop(&mut self, paths: &SessionPaths) -> Result<(), SessionError> {
        let mut active = self.active.take().ok_or(SessionError::NoActiveRecording)?;

        info!("Stopping capture (session {})", active.session_id);
        terminate(&mut active.child)
            .await
            .map_err(|source| SessionError::RecordingIo {
                stage: "killing capture process",
                source,
            })?;

        tokio::fs::rename(&paths.temp_audio, &paths.final_audio)
            .await
            .map_err(|source| SessionError::RecordingIo {
                stage: "renaming captured audio",
                source,
            })?;

        info!(
            "Recording saved and ready for transcription: {}",
            paths.final_audio.display()
        );

        Ok(())
    }

    /// Kills the active capture process and discards its partial output.
    ///
    /// Used instead of `stop` when the session can no longer be
    /// transcribed: renaming the audio would only wake the engine for a
    /// result nobody will collect.
    pub async fn abort(&mut self, paths: &SessionPaths) -> Result<(), SessionError> {
        let mut active = self.active.take().ok_or(SessionError::NoActiveRecording)?;

        info!("Aborting capture (session {})", active.session_id);
        terminate(&mut active.child)
            .await
            .map_err(|source| SessionError::RecordingIo {
                stage: "killing capture process",
                source,
            })?;

        remove_artifacts(&[&paths.temp_audio]).await;
        Ok(())
    }
}

/// Asks the capture process to exit, falling back to a hard kill.
///
/// Capture tools finalize their output file (WAV length headers included)
/// on SIGTERM; SIGKILL gives them no chance to.
#[cfg(unix)]
async fn terminate(child: &mut Child) -> std::io::Result<()> {
    if let Some(pid) = child.id() {
        unsafe {
            libc::kill(pid as libc::pid_t, libc::SIGTERM);
        }
        match tokio::time::timeout(TERMINATE_GRACE, child.wait()).await {
            Ok(status) => return status.map(|_| ()),
            Err(_) => warn!("Capture process ignored terminate, killing it"),
        }
    }
    child.kill().await
}

#[cfg(not(unix))]
async fn terminate(child: &mut Child) -> std::io::Result<()> {
    child.kill().await
}

/// Checks whether the configured capture tool can be spawned at all.
///
/// Advisory startup diagnostic; the exit code of `--help` is ignored
/// since some tools (sox included) use a non-zero code for usage output.
pub async fn is_available(config: &CaptureConfig) -> bool {
    Command::new(&config.program)
        .arg("--help")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .is_ok()
}

fn forward_output<R>(stream: R, label: &'static str, session_id: SessionId)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => debug!("capture {label} (session {session_id}): {line}"),
                Ok(None) => break,
                Err(e) => {
                    warn!("capture {label} (session {session_id}) read failed: {e}");
                    break;
                }
            }
        }
    });
}
