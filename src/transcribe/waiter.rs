use std::path::Path;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::SessionError;

/// Timing knobs for the result poll loop.
#[derive(Debug, Clone)]
pub struct WaitConfig {
    /// Total time to wait for the file before giving up.
    pub timeout: Duration,

    /// Cadence of existence checks.
    pub poll_interval: Duration,

    /// Pause after first detection, to give the writer time to finish
    /// flushing. An approximation, not a completeness guarantee.
    pub settle_delay: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(100),
            settle_delay: Duration::from_millis(100),
        }
    }
}

/// Polls for `path` to exist, within `config.timeout`.
///
/// The external engine writes the file at a time of its choosing; all we
/// can do is check at `poll_interval` cadence. Cancellation is observed
/// at every iteration boundary, so a cancelled wait returns within one
/// poll interval instead of running out the deadline.
pub async fn wait_for_file(
    path: &Path,
    config: &WaitConfig,
    cancel: &CancellationToken,
) -> Result<(), SessionError> {
    let deadline = Instant::now() + config.timeout;

    loop {
        if cancel.is_cancelled() {
            return Err(SessionError::Cancelled {
                path: path.to_path_buf(),
            });
        }

        if path.exists() {
            debug!("Result file detected: {}", path.display());
            sleep(config.settle_delay).await;
            return Ok(());
        }

        if Instant::now() >= deadline {
            return Err(SessionError::Timeout {
                path: path.to_path_buf(),
                timeout: config.timeout,
            });
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                return Err(SessionError::Cancelled {
                    path: path.to_path_buf(),
                });
            }
            _ = sleep(config.poll_interval) => {}
        }
    }
}
