use tokio_util::sync::CancellationToken;
use tracing::info;

use super::cleanup::remove_artifacts;
use super::result::Transcription;
use super::waiter::{wait_for_file, WaitConfig};
use crate::error::SessionError;
use crate::paths::SessionPaths;

/// Runs wait → read → parse for one stopped session, then removes the
/// audio and result artifacts regardless of how the earlier steps ended.
///
/// Cleanup runs on timeout and cancellation too: a session never leaves
/// files behind for the next one to trip over, at the cost of discarding
/// audio the engine did not get to in time.
pub async fn run(
    paths: &SessionPaths,
    config: &WaitConfig,
    cancel: &CancellationToken,
) -> Result<Transcription, SessionError> {
    let outcome = wait_and_parse(paths, config, cancel).await;
    remove_artifacts(&[&paths.final_audio, &paths.result]).await;
    outcome
}

async fn wait_and_parse(
    paths: &SessionPaths,
    config: &WaitConfig,
    cancel: &CancellationToken,
) -> Result<Transcription, SessionError> {
    info!("Waiting for result file: {}", paths.result.display());
    wait_for_file(&paths.result, config, cancel).await?;

    let raw = tokio::fs::read_to_string(&paths.result)
        .await
        .map_err(|source| SessionError::RecordingIo {
            stage: "reading result file",
            source,
        })?;

    let transcription: Transcription =
        serde_json::from_str(&raw).map_err(|e| SessionError::MalformedResult {
            path: paths.result.clone(),
            reason: e.to_string(),
        })?;

    info!(
        "Result parsed: {} segment(s), language '{}'",
        transcription.segments.len(),
        transcription.language
    );

    Ok(transcription)
}
