// Integration tests for the result poll loop
//
// These tests verify the bounded wait, the settle delay, and prompt
// cancellation against a real (temporary) filesystem.

use anyhow::Result;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use whisper_bridge::transcribe::{wait_for_file, WaitConfig};
use whisper_bridge::SessionError;

fn fast_wait() -> WaitConfig {
    WaitConfig {
        timeout: Duration::from_millis(500),
        poll_interval: Duration::from_millis(25),
        settle_delay: Duration::from_millis(25),
    }
}

#[tokio::test]
async fn returns_quickly_when_file_already_exists() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("s1_recording.json");
    std::fs::write(&path, b"{}")?;

    let started = std::time::Instant::now();
    wait_for_file(&path, &fast_wait(), &CancellationToken::new()).await?;

    // One settle delay, plus scheduling slack.
    assert!(started.elapsed() < Duration::from_millis(300));
    Ok(())
}

#[tokio::test]
async fn detects_file_written_mid_wait() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("s2_recording.json");

    let writer_path = path.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        std::fs::write(&writer_path, b"{}").unwrap();
    });

    let config = WaitConfig {
        timeout: Duration::from_secs(5),
        ..fast_wait()
    };
    let started = std::time::Instant::now();
    wait_for_file(&path, &config, &CancellationToken::new()).await?;

    assert!(started.elapsed() >= Duration::from_millis(150));
    assert!(started.elapsed() < Duration::from_secs(2));
    Ok(())
}

#[tokio::test]
async fn times_out_when_file_never_appears() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("s3_recording.json");

    let started = std::time::Instant::now();
    let err = wait_for_file(&path, &fast_wait(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Timeout { .. }));
    // Approximately the configured timeout, within a poll interval or two
    // of slack on either side.
    assert!(started.elapsed() >= Duration::from_millis(450));
    assert!(started.elapsed() < Duration::from_millis(1500));
    Ok(())
}

#[tokio::test]
async fn cancellation_preempts_the_timeout() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("s4_recording.json");

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let config = WaitConfig {
        timeout: Duration::from_secs(30),
        ..fast_wait()
    };
    let started = std::time::Instant::now();
    let err = wait_for_file(&path, &config, &cancel).await.unwrap_err();

    assert!(matches!(err, SessionError::Cancelled { .. }));
    // Within one poll interval of the cancellation, not the full timeout.
    assert!(started.elapsed() < Duration::from_secs(1));
    Ok(())
}
