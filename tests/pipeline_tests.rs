// Integration tests for the transcription pipeline
//
// These tests verify that the wait -> parse -> cleanup sequence returns
// the parsed transcription and removes artifacts on every exit path.

use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use whisper_bridge::transcribe::{self, WaitConfig};
use whisper_bridge::{SessionError, SessionPaths};

fn fast_wait() -> WaitConfig {
    WaitConfig {
        timeout: Duration::from_millis(400),
        poll_interval: Duration::from_millis(25),
        settle_delay: Duration::from_millis(25),
    }
}

fn session_paths(dir: &Path, id: &str) -> SessionPaths {
    SessionPaths::for_session(id, dir).unwrap()
}

#[tokio::test]
async fn success_returns_transcript_and_removes_both_artifacts() -> Result<()> {
    let dir = TempDir::new()?;
    let paths = session_paths(dir.path(), "s1");

    std::fs::write(&paths.final_audio, b"riff")?;
    std::fs::write(
        &paths.result,
        r#"{"text": "hello", "segments": [], "language": "en"}"#,
    )?;

    let transcription =
        transcribe::run(&paths, &fast_wait(), &CancellationToken::new()).await?;

    assert_eq!(transcription.text, "hello");
    assert!(transcription.segments.is_empty());
    assert_eq!(transcription.language, "en");
    assert!(!paths.final_audio.exists(), "audio artifact must be removed");
    assert!(!paths.result.exists(), "result artifact must be removed");
    Ok(())
}

#[tokio::test]
async fn malformed_result_fails_but_still_removes_artifacts() -> Result<()> {
    let dir = TempDir::new()?;
    let paths = session_paths(dir.path(), "s2");

    std::fs::write(&paths.final_audio, b"riff")?;
    std::fs::write(&paths.result, "this is not json")?;

    let err = transcribe::run(&paths, &fast_wait(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::MalformedResult { .. }));
    assert!(!paths.final_audio.exists());
    assert!(!paths.result.exists());
    Ok(())
}

#[tokio::test]
async fn missing_required_fields_count_as_malformed() -> Result<()> {
    let dir = TempDir::new()?;
    let paths = session_paths(dir.path(), "s3");

    std::fs::write(&paths.final_audio, b"riff")?;
    // Valid JSON, but no "language" field.
    std::fs::write(&paths.result, r#"{"text": "hello", "segments": []}"#)?;

    let err = transcribe::run(&paths, &fast_wait(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::MalformedResult { .. }));
    Ok(())
}

#[tokio::test]
async fn timeout_removes_the_orphaned_audio_artifact() -> Result<()> {
    let dir = TempDir::new()?;
    let paths = session_paths(dir.path(), "s4");

    // Audio exists, but the engine never writes a result.
    std::fs::write(&paths.final_audio, b"riff")?;

    let err = transcribe::run(&paths, &fast_wait(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Timeout { .. }));
    assert!(
        !paths.final_audio.exists(),
        "audio is removed even when the wait times out"
    );
    Ok(())
}

#[tokio::test]
async fn segments_are_passed_through_untouched() -> Result<()> {
    let dir = TempDir::new()?;
    let paths = session_paths(dir.path(), "s5");

    std::fs::write(&paths.final_audio, b"riff")?;
    std::fs::write(
        &paths.result,
        r#"{
            "text": " One two.",
            "segments": [
                {"id": 0, "seek": 0, "start": 0.0, "end": 0.8, "text": " One",
                 "tokens": [50364, 1485], "temperature": 0.0},
                {"id": 1, "seek": 0, "start": 0.8, "end": 1.6, "text": " two.",
                 "tokens": [50404, 732, 13], "temperature": 0.2}
            ],
            "language": "en"
        }"#,
    )?;

    let transcription =
        transcribe::run(&paths, &fast_wait(), &CancellationToken::new()).await?;

    assert_eq!(transcription.segments.len(), 2);
    assert_eq!(transcription.segments[0].id, 0);
    assert_eq!(transcription.segments[1].tokens, vec![50404, 732, 13]);
    assert!((transcription.segments[1].temperature - 0.2).abs() < f64::EPSILON);
    Ok(())
}
